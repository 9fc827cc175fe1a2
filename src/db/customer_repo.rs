// src/db/customer_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::customer::Customer};

// SELECT base com o endereço do dono embutido via LEFT JOIN.
// As colunas do endereço levam o prefixo `a_` esperado pelo FromRow de Customer.
pub(crate) const CUSTOMER_SELECT: &str = "\
    SELECT c.id, c.name, c.tax_id, c.phone, c.email, \
           a.id AS a_id, a.postal_code AS a_postal_code, a.street AS a_street, \
           a.number AS a_number, a.complement AS a_complement, a.district AS a_district, \
           a.city AS a_city, a.state AS a_state, a.country AS a_country \
    FROM customers c \
    LEFT JOIN addresses a ON a.id = c.address_id";

// O repositório de clientes, responsável por todas as interações com a
// tabela 'customers'.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let sql = format!("{CUSTOMER_SELECT} ORDER BY c.name ASC");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    // Busca um cliente pelo seu CPF (retorno exato, zero ou um).
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Customer>, AppError> {
        let sql = format!("{CUSTOMER_SELECT} WHERE c.tax_id = ?");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(tax_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{CUSTOMER_SELECT} WHERE c.id = ?");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(customer)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    // Checagem de existência sem carregar a linha.
    pub async fn exists_by_tax_id<'e, E>(&self, executor: E, tax_id: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE tax_id = ?)")
                .bind(tax_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    // Insere e devolve o id gerado pelo banco. O índice único de tax_id cobre
    // a corrida entre a pré-checagem e o INSERT.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        tax_id: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address_id: Option<i64>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO customers (name, tax_id, phone, email, address_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(tax_id)
        .bind(phone)
        .bind(email)
        .bind(address_id)
        .execute(executor)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateKey(format!(
                        "O CPF '{}' já está cadastrado.",
                        tax_id.unwrap_or_default()
                    ));
                }
            }
            AppError::DatabaseError(e)
        })?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        tax_id: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address_id: Option<i64>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE customers SET name = ?, tax_id = ?, phone = ?, email = ?, address_id = ? \
             WHERE id = ?",
        )
        .bind(name)
        .bind(tax_id)
        .bind(phone)
        .bind(email)
        .bind(address_id)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateKey(format!(
                        "O CPF '{}' já está cadastrado.",
                        tax_id.unwrap_or_default()
                    ));
                }
            }
            AppError::DatabaseError(e)
        })?;
        Ok(())
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                // No modo permissivo ninguém pré-checa dependentes; quem barra
                // a exclusão de um cliente com vendas é a FK do banco.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferentialIntegrityViolation(
                            "O cliente possui vendas associadas.".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;
        Ok(())
    }
}

// src/db/supplier_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::supplier::Supplier};

// Mesmo formato do CUSTOMER_SELECT: endereço embutido com prefixo `a_`.
pub(crate) const SUPPLIER_SELECT: &str = "\
    SELECT s.id, s.name, s.tax_id, s.phone, s.email, \
           a.id AS a_id, a.postal_code AS a_postal_code, a.street AS a_street, \
           a.number AS a_number, a.complement AS a_complement, a.district AS a_district, \
           a.city AS a_city, a.state AS a_state, a.country AS a_country \
    FROM suppliers s \
    LEFT JOIN addresses a ON a.id = s.address_id";

#[derive(Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Supplier>, AppError> {
        let sql = format!("{SUPPLIER_SELECT} ORDER BY s.name ASC");
        let suppliers = sqlx::query_as::<_, Supplier>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    // Busca um fornecedor pelo seu CNPJ.
    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Supplier>, AppError> {
        let sql = format!("{SUPPLIER_SELECT} WHERE s.tax_id = ?");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(tax_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(supplier)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{SUPPLIER_SELECT} WHERE s.id = ?");
        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(supplier)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = ?)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn exists_by_tax_id<'e, E>(&self, executor: E, tax_id: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE tax_id = ?)")
                .bind(tax_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

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
            "INSERT INTO suppliers (name, tax_id, phone, email, address_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(tax_id)
        .bind(phone)
        .bind(email)
        .bind(address_id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateKey(format!(
                        "O CNPJ '{}' já está cadastrado.",
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
            "UPDATE suppliers SET name = ?, tax_id = ?, phone = ?, email = ?, address_id = ? \
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
                        "O CNPJ '{}' já está cadastrado.",
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
        sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferentialIntegrityViolation(
                            "O fornecedor possui produtos associados.".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;
        Ok(())
    }
}

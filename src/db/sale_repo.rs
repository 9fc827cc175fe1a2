// src/db/sale_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::sale::Sale};

// As linhas devolvidas aqui vêm sem os itens; quem monta o agregado completo
// (venda + itens) é o SaleService, com a consulta reversa por sale_id.
#[derive(Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY sale_date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    // Índice reverso da associação não-dona Cliente↔Venda.
    pub async fn find_by_customer_id(&self, customer_id: i64) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE customer_id = ?")
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    // Período inclusivo nas duas pontas (BETWEEN).
    pub async fn find_by_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE sale_date BETWEEN ? AND ?")
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sale)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sales WHERE id = ?)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn exists_by_customer_id<'e, E>(
        &self,
        executor: E,
        customer_id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sales WHERE customer_id = ?)")
                .bind(customer_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        customer_id: i64,
        sale_date: DateTime<Utc>,
        total_amount: Decimal,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result =
            sqlx::query("INSERT INTO sales (customer_id, sale_date, total_amount) VALUES (?, ?, ?)")
                .bind(customer_id)
                .bind(sale_date)
                .bind(total_amount.to_string())
                .execute(executor)
                .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        customer_id: i64,
        sale_date: DateTime<Utc>,
        total_amount: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE sales SET customer_id = ?, sale_date = ?, total_amount = ? WHERE id = ?")
            .bind(customer_id)
            .bind(sale_date)
            .bind(total_amount.to_string())
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Reatribui a venda a outro cliente (manutenção da associação; a FK é
    // obrigatória, então não existe "desanexar sem reatribuir").
    pub async fn set_customer<'e, E>(
        &self,
        executor: E,
        id: i64,
        customer_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE sales SET customer_id = ? WHERE id = ?")
            .bind(customer_id)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

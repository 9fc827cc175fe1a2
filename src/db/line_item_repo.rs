// src/db/line_item_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::sale::LineItem};

#[derive(Clone)]
pub struct LineItemRepository {
    pool: SqlitePool,
}

impl LineItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>("SELECT * FROM line_items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn find_by_product_id(&self, product_id: i64) -> Result<Vec<LineItem>, AppError> {
        let items = sqlx::query_as::<_, LineItem>("SELECT * FROM line_items WHERE product_id = ?")
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    // Índice reverso do agregado: os itens de uma venda.
    pub async fn find_by_sale_id<'e, E>(
        &self,
        executor: E,
        sale_id: i64,
    ) -> Result<Vec<LineItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items =
            sqlx::query_as::<_, LineItem>("SELECT * FROM line_items WHERE sale_id = ? ORDER BY id ASC")
                .bind(sale_id)
                .fetch_all(executor)
                .await?;
        Ok(items)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<LineItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, LineItem>("SELECT * FROM line_items WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM line_items WHERE id = ?)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        sale_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
        subtotal: Option<Decimal>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO line_items (sale_id, product_id, quantity, unit_price, subtotal) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price.to_string())
        .bind(subtotal.map(|s| s.to_string()))
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        sale_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
        subtotal: Option<Decimal>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE line_items \
             SET sale_id = ?, product_id = ?, quantity = ?, unit_price = ?, subtotal = ? \
             WHERE id = ?",
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price.to_string())
        .bind(subtotal.map(|s| s.to_string()))
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM line_items WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Cascata da exclusão da venda dona.
    pub async fn delete_by_sale_id<'e, E>(&self, executor: E, sale_id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM line_items WHERE sale_id = ?")
            .bind(sale_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    // Busca parcial no nome, sem diferenciar maiúsculas de minúsculas.
    pub async fn find_by_name_containing(&self, term: &str) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products \
             WHERE LOWER(name) LIKE '%' || LOWER(?) || '%' \
             ORDER BY name ASC",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Índice reverso da associação não-dona Fornecedor↔Produto.
    pub async fn find_by_supplier_id(&self, supplier_id: i64) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE supplier_id = ?")
                .bind(supplier_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    // Comparação estrita: estoque < limite.
    pub async fn find_by_stock_quantity_less_than(
        &self,
        threshold: i32,
    ) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE stock_quantity < ?")
                .bind(threshold)
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn exists_by_supplier_id<'e, E>(
        &self,
        executor: E,
        supplier_id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE supplier_id = ?)")
                .bind(supplier_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        price: Option<Decimal>,
        stock_quantity: i32,
        supplier_id: Option<i64>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, stock_quantity, supplier_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(price.map(|p| p.to_string()))
        .bind(stock_quantity)
        .bind(supplier_id)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        description: Option<&str>,
        price: Option<Decimal>,
        stock_quantity: i32,
        supplier_id: Option<i64>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE products \
             SET name = ?, description = ?, price = ?, stock_quantity = ?, supplier_id = ? \
             WHERE id = ?",
        )
        .bind(name)
        .bind(description)
        .bind(price.map(|p| p.to_string()))
        .bind(stock_quantity)
        .bind(supplier_id)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Desfaz a associação com o fornecedor (lado dono, FK anulável).
    pub async fn set_supplier<'e, E>(
        &self,
        executor: E,
        id: i64,
        supplier_id: Option<i64>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE products SET supplier_id = ? WHERE id = ?")
            .bind(supplier_id)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                // Produto referenciado por itens de venda históricos.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferentialIntegrityViolation(
                            "O produto possui itens de venda associados.".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;
        Ok(())
    }
}

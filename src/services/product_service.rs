// src/services/product_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SupplierRepository},
    models::product::{Product, ProductPayload},
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    supplier_repo: SupplierRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository, supplier_repo: SupplierRepository) -> Self {
        Self {
            product_repo,
            supplier_repo,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.find_all().await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Produto"))
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Product>, AppError> {
        self.product_repo.find_by_name_containing(term).await
    }

    pub async fn find_by_supplier(&self, supplier_id: i64) -> Result<Vec<Product>, AppError> {
        self.product_repo.find_by_supplier_id(supplier_id).await
    }

    pub async fn find_low_stock(&self, threshold: i32) -> Result<Vec<Product>, AppError> {
        self.product_repo
            .find_by_stock_quantity_less_than(threshold)
            .await
    }

    pub async fn create(
        &self,
        pool: &SqlitePool,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;
        let stock_quantity = payload
            .stock_quantity
            .ok_or(AppError::MissingField("stockQuantity"))?;

        let mut tx = pool.begin().await?;

        // Produto com fornecedor inexistente nunca chega ao banco.
        if let Some(supplier_id) = payload.supplier_id {
            if !self.supplier_repo.exists_by_id(&mut *tx, supplier_id).await? {
                return Err(AppError::InvalidReference("supplierId"));
            }
        }

        let id = self
            .product_repo
            .insert(
                &mut *tx,
                name,
                payload.description.as_deref(),
                payload.price,
                stock_quantity,
                payload.supplier_id,
            )
            .await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;
        let stock_quantity = payload
            .stock_quantity
            .ok_or(AppError::MissingField("stockQuantity"))?;

        let mut tx = pool.begin().await?;

        if !self.product_repo.exists_by_id(&mut *tx, id).await? {
            return Err(AppError::NotFound("Produto"));
        }
        if let Some(supplier_id) = payload.supplier_id {
            if !self.supplier_repo.exists_by_id(&mut *tx, supplier_id).await? {
                return Err(AppError::InvalidReference("supplierId"));
            }
        }

        self.product_repo
            .update(
                &mut *tx,
                id,
                name,
                payload.description.as_deref(),
                payload.price,
                stock_quantity,
                payload.supplier_id,
            )
            .await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        if !self.product_repo.exists_by_id(pool, id).await? {
            return Err(AppError::NotFound("Produto"));
        }
        // Itens de venda históricos barram a exclusão via FK (409).
        self.product_repo.delete_by_id(pool, id).await
    }
}

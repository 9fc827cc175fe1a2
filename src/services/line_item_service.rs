// src/services/line_item_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{LineItemRepository, ProductRepository, SaleRepository},
    models::sale::{LineItem, StandaloneLineItemPayload, line_subtotal},
};

// Itens de venda normalmente nascem embutidos no payload da venda; este
// serviço cobre o caminho avulso do endpoint /api/line-items.
#[derive(Clone)]
pub struct LineItemService {
    line_item_repo: LineItemRepository,
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
}

impl LineItemService {
    pub fn new(
        line_item_repo: LineItemRepository,
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
    ) -> Self {
        Self {
            line_item_repo,
            sale_repo,
            product_repo,
        }
    }

    pub async fn list(&self) -> Result<Vec<LineItem>, AppError> {
        self.line_item_repo.find_all().await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<LineItem, AppError> {
        self.line_item_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Item de venda"))
    }

    pub async fn find_by_sale(&self, pool: &SqlitePool, sale_id: i64) -> Result<Vec<LineItem>, AppError> {
        self.line_item_repo.find_by_sale_id(pool, sale_id).await
    }

    pub async fn find_by_product(&self, product_id: i64) -> Result<Vec<LineItem>, AppError> {
        self.line_item_repo.find_by_product_id(product_id).await
    }

    pub async fn create(
        &self,
        pool: &SqlitePool,
        payload: &StandaloneLineItemPayload,
    ) -> Result<LineItem, AppError> {
        payload.validate()?;
        let sale_id = payload.sale_id.ok_or(AppError::MissingField("saleId"))?;
        let product_id = payload
            .item
            .product_id
            .ok_or(AppError::MissingField("productId"))?;
        let quantity = payload
            .item
            .quantity
            .ok_or(AppError::MissingField("quantity"))?;
        let unit_price = payload
            .item
            .unit_price
            .ok_or(AppError::MissingField("unitPrice"))?;

        let mut tx = pool.begin().await?;

        // Item órfão de venda ou apontando para produto inexistente nunca
        // chega ao banco.
        if !self.sale_repo.exists_by_id(&mut *tx, sale_id).await? {
            return Err(AppError::InvalidReference("saleId"));
        }
        if !self.product_repo.exists_by_id(&mut *tx, product_id).await? {
            return Err(AppError::InvalidReference("productId"));
        }

        let subtotal = line_subtotal(Some(quantity), Some(unit_price));
        let id = self
            .line_item_repo
            .insert(&mut *tx, sale_id, product_id, quantity, unit_price, subtotal)
            .await?;

        let item = self
            .line_item_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Item de venda"))?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &StandaloneLineItemPayload,
    ) -> Result<LineItem, AppError> {
        payload.validate()?;
        let sale_id = payload.sale_id.ok_or(AppError::MissingField("saleId"))?;
        let product_id = payload
            .item
            .product_id
            .ok_or(AppError::MissingField("productId"))?;
        let quantity = payload
            .item
            .quantity
            .ok_or(AppError::MissingField("quantity"))?;
        let unit_price = payload
            .item
            .unit_price
            .ok_or(AppError::MissingField("unitPrice"))?;

        let mut tx = pool.begin().await?;

        if !self.line_item_repo.exists_by_id(&mut *tx, id).await? {
            return Err(AppError::NotFound("Item de venda"));
        }
        if !self.sale_repo.exists_by_id(&mut *tx, sale_id).await? {
            return Err(AppError::InvalidReference("saleId"));
        }
        if !self.product_repo.exists_by_id(&mut *tx, product_id).await? {
            return Err(AppError::InvalidReference("productId"));
        }

        // Subtotal recalculado em toda atualização, como na inserção.
        let subtotal = line_subtotal(Some(quantity), Some(unit_price));
        self.line_item_repo
            .update(&mut *tx, id, sale_id, product_id, quantity, unit_price, subtotal)
            .await?;

        let item = self
            .line_item_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Item de venda"))?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        if !self.line_item_repo.exists_by_id(pool, id).await? {
            return Err(AppError::NotFound("Item de venda"));
        }
        self.line_item_repo.delete_by_id(pool, id).await
    }
}

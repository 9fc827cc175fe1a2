// src/services/sale_service.rs

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, LineItemRepository, ProductRepository, SaleRepository},
    models::sale::{LineItem, LineItemPayload, Sale, SalePayload, line_subtotal},
};

// A venda é o agregado dono dos itens: toda mutação aqui roda em uma única
// transação que aplica (ou desfaz) venda e itens juntos.
#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    line_item_repo: LineItemRepository,
    customer_repo: CustomerRepository,
    product_repo: ProductRepository,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        line_item_repo: LineItemRepository,
        customer_repo: CustomerRepository,
        product_repo: ProductRepository,
    ) -> Self {
        Self {
            sale_repo,
            line_item_repo,
            customer_repo,
            product_repo,
        }
    }

    // Monta o agregado completo: linha da venda + itens via índice reverso.
    async fn with_items(&self, pool: &SqlitePool, sales: Vec<Sale>) -> Result<Vec<Sale>, AppError> {
        let mut result = Vec::with_capacity(sales.len());
        for sale in sales {
            let items = self.line_item_repo.find_by_sale_id(pool, sale.id).await?;
            result.push(Sale { items, ..sale });
        }
        Ok(result)
    }

    pub async fn list(&self, pool: &SqlitePool) -> Result<Vec<Sale>, AppError> {
        let sales = self.sale_repo.find_all().await?;
        self.with_items(pool, sales).await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<Sale, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;
        let items = self.line_item_repo.find_by_sale_id(pool, sale.id).await?;
        Ok(Sale { items, ..sale })
    }

    pub async fn find_by_customer(
        &self,
        pool: &SqlitePool,
        customer_id: i64,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = self.sale_repo.find_by_customer_id(customer_id).await?;
        self.with_items(pool, sales).await
    }

    pub async fn find_by_period(
        &self,
        pool: &SqlitePool,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Sale>, AppError> {
        let sales = self.sale_repo.find_by_period(start, end).await?;
        self.with_items(pool, sales).await
    }

    // Valida as referências do item e grava com o subtotal recalculado e a
    // referência reversa (sale_id) já apontando para a venda dona.
    async fn insert_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sale_id: i64,
        item: &LineItemPayload,
    ) -> Result<i64, AppError> {
        let product_id = item
            .product_id
            .ok_or(AppError::MissingField("productId"))?;
        if !self.product_repo.exists_by_id(&mut **tx, product_id).await? {
            return Err(AppError::InvalidReference("productId"));
        }
        let quantity = item.quantity.ok_or(AppError::MissingField("quantity"))?;
        let unit_price = item.unit_price.ok_or(AppError::MissingField("unitPrice"))?;

        // Derivado, recalculado imediatamente antes de cada gravação.
        let subtotal = line_subtotal(Some(quantity), Some(unit_price));

        self.line_item_repo
            .insert(&mut **tx, sale_id, product_id, quantity, unit_price, subtotal)
            .await
    }

    pub async fn create(&self, pool: &SqlitePool, payload: &SalePayload) -> Result<Sale, AppError> {
        payload.validate()?;
        let customer_id = payload
            .customer_id
            .ok_or(AppError::MissingField("customerId"))?;
        let total_amount = payload
            .total_amount
            .ok_or(AppError::MissingField("totalAmount"))?;

        let mut tx = pool.begin().await?;

        // Venda sem cliente válido nunca chega ao banco.
        if !self.customer_repo.exists_by_id(&mut *tx, customer_id).await? {
            return Err(AppError::InvalidReference("customerId"));
        }

        // Data preenchida uma única vez, na inserção.
        let sale_date = payload.sale_date.unwrap_or_else(Utc::now);

        // O total é o informado pelo chamador; o modelo não o deriva dos
        // itens (só o subtotal de cada item é derivado).
        let sale_id = self
            .sale_repo
            .insert(&mut *tx, customer_id, sale_date, total_amount)
            .await?;

        for item in &payload.items {
            self.insert_item(&mut tx, sale_id, item).await?;
        }

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, sale_id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;
        let items = self.line_item_repo.find_by_sale_id(&mut *tx, sale_id).await?;

        tx.commit().await?;
        Ok(Sale { items, ..sale })
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &SalePayload,
    ) -> Result<Sale, AppError> {
        payload.validate()?;
        let customer_id = payload
            .customer_id
            .ok_or(AppError::MissingField("customerId"))?;
        let total_amount = payload
            .total_amount
            .ok_or(AppError::MissingField("totalAmount"))?;

        let mut tx = pool.begin().await?;

        let existing = self
            .sale_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;

        if !self.customer_repo.exists_by_id(&mut *tx, customer_id).await? {
            return Err(AppError::InvalidReference("customerId"));
        }

        // A data é definida uma única vez: sem valor novo, mantém a original.
        let sale_date = payload.sale_date.unwrap_or(existing.sale_date);

        self.sale_repo
            .update(&mut *tx, id, customer_id, sale_date, total_amount)
            .await?;

        // Substituição integral da lista: os itens antigos viram órfãos e são
        // removidos, os novos entram com subtotal recalculado.
        self.line_item_repo.delete_by_sale_id(&mut *tx, id).await?;
        for item in &payload.items {
            self.insert_item(&mut tx, id, item).await?;
        }

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;
        let items = self.line_item_repo.find_by_sale_id(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(Sale { items, ..sale })
    }

    /// Cascata como script explícito: apaga os itens, depois a venda.
    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        if !self.sale_repo.exists_by_id(&mut *tx, id).await? {
            return Err(AppError::NotFound("Venda"));
        }

        self.line_item_repo.delete_by_sale_id(&mut *tx, id).await?;
        self.sale_repo.delete_by_id(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Operações de pareamento Venda↔Item (agregado dono)
    // ---

    /// Adiciona um item à venda; a referência reversa item→venda é definida
    /// na própria inserção.
    pub async fn add_line_item(
        &self,
        pool: &SqlitePool,
        sale_id: i64,
        payload: &LineItemPayload,
    ) -> Result<LineItem, AppError> {
        payload.validate()?;

        let mut tx = pool.begin().await?;

        if !self.sale_repo.exists_by_id(&mut *tx, sale_id).await? {
            return Err(AppError::NotFound("Venda"));
        }

        let item_id = self.insert_item(&mut tx, sale_id, payload).await?;
        let item = self
            .line_item_repo
            .find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(AppError::NotFound("Item de venda"))?;

        tx.commit().await?;
        Ok(item)
    }

    /// Remove um item da venda; desvinculado do dono, o item é órfão e some.
    pub async fn remove_line_item(
        &self,
        pool: &SqlitePool,
        sale_id: i64,
        item_id: i64,
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let item = self
            .line_item_repo
            .find_by_id(&mut *tx, item_id)
            .await?
            .ok_or(AppError::NotFound("Item de venda"))?;
        if item.sale_id != sale_id {
            return Err(AppError::NotFound("Item de venda"));
        }

        self.line_item_repo.delete_by_id(&mut *tx, item_id).await?;

        tx.commit().await?;
        Ok(())
    }
}

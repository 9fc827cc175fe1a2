// src/services/supplier_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::DeletePolicy,
    db::{AddressRepository, ProductRepository, SupplierRepository},
    models::{
        product::Product,
        supplier::{Supplier, SupplierPayload},
    },
};

// Espelha o CustomerService: fornecedor é dono exclusivo de um endereço e
// lado não-dono da associação com produtos.
#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
    address_repo: AddressRepository,
    product_repo: ProductRepository,
    delete_policy: DeletePolicy,
}

impl SupplierService {
    pub fn new(
        supplier_repo: SupplierRepository,
        address_repo: AddressRepository,
        product_repo: ProductRepository,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            supplier_repo,
            address_repo,
            product_repo,
            delete_policy,
        }
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.find_all().await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<Supplier, AppError> {
        self.supplier_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))
    }

    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Supplier, AppError> {
        self.supplier_repo
            .find_by_tax_id(tax_id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))
    }

    pub async fn create(
        &self,
        pool: &SqlitePool,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;

        // Mesma pré-checagem não-atômica do cliente; o índice único decide.
        if let Some(tax_id) = payload.tax_id.as_deref() {
            if self.supplier_repo.exists_by_tax_id(pool, tax_id).await? {
                return Err(AppError::DuplicateKey(format!(
                    "O CNPJ '{tax_id}' já está cadastrado."
                )));
            }
        }

        let mut tx = pool.begin().await?;

        let address_id = match &payload.address {
            Some(address) => Some(self.address_repo.insert(&mut *tx, address).await?.id),
            None => None,
        };

        let id = self
            .supplier_repo
            .insert(
                &mut *tx,
                name,
                payload.tax_id.as_deref(),
                payload.phone.as_deref(),
                payload.email.as_deref(),
                address_id,
            )
            .await?;

        let supplier = self
            .supplier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))?;

        tx.commit().await?;
        Ok(supplier)
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;

        let mut tx = pool.begin().await?;

        let existing = self
            .supplier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))?;

        let address_id = match (&payload.address, &existing.address) {
            (Some(new_address), Some(current)) => {
                self.address_repo.update(&mut *tx, current.id, new_address).await?;
                Some(current.id)
            }
            (Some(new_address), None) => {
                Some(self.address_repo.insert(&mut *tx, new_address).await?.id)
            }
            (None, _) => None,
        };

        self.supplier_repo
            .update(
                &mut *tx,
                id,
                name,
                payload.tax_id.as_deref(),
                payload.phone.as_deref(),
                payload.email.as_deref(),
                address_id,
            )
            .await?;

        // Remoção de órfão quando o payload veio sem endereço.
        if payload.address.is_none() {
            if let Some(orphan) = &existing.address {
                self.address_repo.delete_by_id(&mut *tx, orphan.id).await?;
            }
        }

        let supplier = self
            .supplier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))?;

        tx.commit().await?;
        Ok(supplier)
    }

    /// Exclui o fornecedor e o endereço possuído em uma única transação.
    /// Produtos dependentes seguem a política de exclusão configurada.
    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .supplier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))?;

        if self.delete_policy == DeletePolicy::RestrictDependents
            && self.product_repo.exists_by_supplier_id(&mut *tx, id).await?
        {
            return Err(AppError::ReferentialIntegrityViolation(
                "O fornecedor possui produtos associados.".to_string(),
            ));
        }

        self.supplier_repo.delete_by_id(&mut *tx, id).await?;
        if let Some(address) = &existing.address {
            self.address_repo.delete_by_id(&mut *tx, address.id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Manutenção da associação Fornecedor↔Produto (lado não-dono)
    // ---

    /// Vincula um produto existente a este fornecedor.
    pub async fn attach_product(
        &self,
        pool: &SqlitePool,
        supplier_id: i64,
        product_id: i64,
    ) -> Result<Product, AppError> {
        let mut tx = pool.begin().await?;

        if !self.supplier_repo.exists_by_id(&mut *tx, supplier_id).await? {
            return Err(AppError::NotFound("Fornecedor"));
        }
        if !self.product_repo.exists_by_id(&mut *tx, product_id).await? {
            return Err(AppError::NotFound("Produto"));
        }

        self.product_repo
            .set_supplier(&mut *tx, product_id, Some(supplier_id))
            .await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        tx.commit().await?;
        Ok(product)
    }

    /// Desvincula um produto deste fornecedor. Diferente da venda, a FK do
    /// produto é anulável, então o desvínculo é válido.
    pub async fn detach_product(
        &self,
        pool: &SqlitePool,
        supplier_id: i64,
        product_id: i64,
    ) -> Result<Product, AppError> {
        let mut tx = pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;
        if product.supplier_id != Some(supplier_id) {
            return Err(AppError::NotFound("Produto"));
        }

        self.product_repo.set_supplier(&mut *tx, product_id, None).await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, product_id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        tx.commit().await?;
        Ok(product)
    }
}

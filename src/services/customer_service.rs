// src/services/customer_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::DeletePolicy,
    db::{AddressRepository, CustomerRepository, SaleRepository},
    models::customer::{Customer, CustomerPayload},
};

#[derive(Clone)]
pub struct CustomerService {
    customer_repo: CustomerRepository,
    address_repo: AddressRepository,
    sale_repo: SaleRepository,
    delete_policy: DeletePolicy,
}

impl CustomerService {
    pub fn new(
        customer_repo: CustomerRepository,
        address_repo: AddressRepository,
        sale_repo: SaleRepository,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            customer_repo,
            address_repo,
            sale_repo,
            delete_policy,
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.customer_repo.find_all().await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<Customer, AppError> {
        self.customer_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn find_by_tax_id(&self, tax_id: &str) -> Result<Customer, AppError> {
        self.customer_repo
            .find_by_tax_id(tax_id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn create(
        &self,
        pool: &SqlitePool,
        payload: &CustomerPayload,
    ) -> Result<Customer, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;

        // Pré-checagem de unicidade do CPF. Não é atômica com o INSERT: sob
        // chamadas concorrentes o índice único do banco decide a corrida, e o
        // repositório devolve o mesmo DuplicateKey.
        if let Some(tax_id) = payload.tax_id.as_deref() {
            if self.customer_repo.exists_by_tax_id(pool, tax_id).await? {
                return Err(AppError::DuplicateKey(format!(
                    "O CPF '{tax_id}' já está cadastrado."
                )));
            }
        }

        let mut tx = pool.begin().await?;

        // O endereço embutido entra primeiro: a FK fica do lado do dono.
        let address_id = match &payload.address {
            Some(address) => Some(self.address_repo.insert(&mut *tx, address).await?.id),
            None => None,
        };

        let id = self
            .customer_repo
            .insert(
                &mut *tx,
                name,
                payload.tax_id.as_deref(),
                payload.phone.as_deref(),
                payload.email.as_deref(),
                address_id,
            )
            .await?;

        let customer = self
            .customer_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        tx.commit().await?;
        Ok(customer)
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &CustomerPayload,
    ) -> Result<Customer, AppError> {
        payload.validate()?;
        let name = payload.name.as_deref().ok_or(AppError::MissingField("name"))?;

        let mut tx = pool.begin().await?;

        let existing = self
            .customer_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        // Sincroniza o endereço possuído com o payload: atualiza o existente,
        // cria um novo, ou desvincula (o desvinculado é removido como órfão
        // logo abaixo, depois que a FK do cliente é solta).
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

        self.customer_repo
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

        if payload.address.is_none() {
            if let Some(orphan) = &existing.address {
                self.address_repo.delete_by_id(&mut *tx, orphan.id).await?;
            }
        }

        let customer = self
            .customer_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        tx.commit().await?;
        Ok(customer)
    }

    /// Exclui o cliente e o endereço possuído em uma única transação.
    ///
    /// Vendas dependentes seguem a política configurada: `RestrictDependents`
    /// pré-checa e rejeita; `Permissive` não checa nada e deixa a FK do banco
    /// barrar (ou não) a exclusão.
    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let existing = self
            .customer_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;

        if self.delete_policy == DeletePolicy::RestrictDependents
            && self.sale_repo.exists_by_customer_id(&mut *tx, id).await?
        {
            return Err(AppError::ReferentialIntegrityViolation(
                "O cliente possui vendas associadas.".to_string(),
            ));
        }

        // Script explícito da cascata: primeiro o dono (solta a FK do
        // endereço), depois o endereço possuído.
        self.customer_repo.delete_by_id(&mut *tx, id).await?;
        if let Some(address) = &existing.address {
            self.address_repo.delete_by_id(&mut *tx, address.id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ---
    // Manutenção da associação Cliente↔Venda (lado não-dono)
    // ---

    /// Vincula uma venda existente a este cliente (reatribui a FK dona).
    pub async fn attach_sale(
        &self,
        pool: &SqlitePool,
        customer_id: i64,
        sale_id: i64,
    ) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        if !self.customer_repo.exists_by_id(&mut *tx, customer_id).await? {
            return Err(AppError::NotFound("Cliente"));
        }
        if !self.sale_repo.exists_by_id(&mut *tx, sale_id).await? {
            return Err(AppError::NotFound("Venda"));
        }

        self.sale_repo.set_customer(&mut *tx, sale_id, customer_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Desvincular uma venda deixaria a FK obrigatória sem valor; uma venda
    /// não existe sem cliente, então a operação é sempre rejeitada.
    pub async fn detach_sale(
        &self,
        pool: &SqlitePool,
        customer_id: i64,
        sale_id: i64,
    ) -> Result<(), AppError> {
        let sale = self
            .sale_repo
            .find_by_id(pool, sale_id)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;
        if sale.customer_id != customer_id {
            return Err(AppError::NotFound("Venda"));
        }
        Err(AppError::InvalidReference("customerId"))
    }
}

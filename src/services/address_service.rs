// src/services/address_service.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::AddressRepository,
    models::address::{Address, AddressPayload},
};

// Endereços normalmente nascem embutidos no payload do dono (cliente ou
// fornecedor), mas também podem ser criados e consultados avulsos.
#[derive(Clone)]
pub struct AddressService {
    address_repo: AddressRepository,
}

impl AddressService {
    pub fn new(address_repo: AddressRepository) -> Self {
        Self { address_repo }
    }

    pub async fn list(&self) -> Result<Vec<Address>, AppError> {
        self.address_repo.find_all().await
    }

    pub async fn find(&self, pool: &SqlitePool, id: i64) -> Result<Address, AppError> {
        self.address_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::NotFound("Endereço"))
    }

    /// Filtros exatos combináveis: CEP tem precedência, depois cidade/UF.
    pub async fn search(
        &self,
        postal_code: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
    ) -> Result<Vec<Address>, AppError> {
        match (postal_code, city, state) {
            (Some(postal_code), _, _) => self.address_repo.find_by_postal_code(postal_code).await,
            (None, Some(city), Some(state)) => {
                self.address_repo.find_by_city_and_state(city, state).await
            }
            (None, Some(city), None) => self.address_repo.find_by_city(city).await,
            (None, None, Some(state)) => self.address_repo.find_by_state(state).await,
            (None, None, None) => self.address_repo.find_all().await,
        }
    }

    pub async fn create(
        &self,
        pool: &SqlitePool,
        payload: &AddressPayload,
    ) -> Result<Address, AppError> {
        payload.validate()?;
        self.address_repo.insert(pool, payload).await
    }

    pub async fn update(
        &self,
        pool: &SqlitePool,
        id: i64,
        payload: &AddressPayload,
    ) -> Result<Address, AppError> {
        payload.validate()?;
        if !self.address_repo.exists_by_id(pool, id).await? {
            return Err(AppError::NotFound("Endereço"));
        }
        self.address_repo.update(pool, id, payload).await
    }

    pub async fn delete(&self, pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        if !self.address_repo.exists_by_id(pool, id).await? {
            return Err(AppError::NotFound("Endereço"));
        }
        self.address_repo.delete_by_id(pool, id).await
    }
}

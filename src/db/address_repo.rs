// src/db/address_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::address::{Address, AddressPayload},
};

// O repositório de endereços, responsável por todas as interações com a
// tabela 'addresses'.
#[derive(Clone)]
pub struct AddressRepository {
    pool: SqlitePool,
}

impl AddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Funções de leitura são simples e podem usar a pool principal.

    pub async fn find_all(&self) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>("SELECT * FROM addresses ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(addresses)
    }

    pub async fn find_by_postal_code(&self, postal_code: &str) -> Result<Vec<Address>, AppError> {
        let addresses =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE postal_code = ?")
                .bind(postal_code)
                .fetch_all(&self.pool)
                .await?;
        Ok(addresses)
    }

    pub async fn find_by_city(&self, city: &str) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE city = ?")
            .bind(city)
            .fetch_all(&self.pool)
            .await?;
        Ok(addresses)
    }

    pub async fn find_by_state(&self, state: &str) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE state = ?")
            .bind(state)
            .fetch_all(&self.pool)
            .await?;
        Ok(addresses)
    }

    pub async fn find_by_city_and_state(
        &self,
        city: &str,
        state: &str,
    ) -> Result<Vec<Address>, AppError> {
        let addresses =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE city = ? AND state = ?")
                .bind(city)
                .bind(state)
                .fetch_all(&self.pool)
                .await?;
        Ok(addresses)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Address>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let address = sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(address)
    }

    pub async fn exists_by_id<'e, E>(&self, executor: E, id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM addresses WHERE id = ?)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        payload: &AddressPayload,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let address = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses (postal_code, street, number, complement, district, city, state, country) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(&payload.postal_code)
        .bind(&payload.street)
        .bind(&payload.number)
        .bind(&payload.complement)
        .bind(&payload.district)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(payload.country.as_deref().unwrap_or("Brasil"))
        .fetch_one(executor)
        .await?;
        Ok(address)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        payload: &AddressPayload,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let address = sqlx::query_as::<_, Address>(
            "UPDATE addresses \
             SET postal_code = ?, street = ?, number = ?, complement = ?, district = ?, \
                 city = ?, state = ?, country = ? \
             WHERE id = ? \
             RETURNING *",
        )
        .bind(&payload.postal_code)
        .bind(&payload.street)
        .bind(&payload.number)
        .bind(&payload.complement)
        .bind(&payload.district)
        .bind(&payload.city)
        .bind(&payload.state)
        .bind(payload.country.as_deref().unwrap_or("Brasil"))
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(address)
    }

    pub async fn delete_by_id<'e, E>(&self, executor: E, id: i64) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                // Endereço ainda referenciado por um cliente ou fornecedor.
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferentialIntegrityViolation(
                            "O endereço pertence a um cliente ou fornecedor.".to_string(),
                        );
                    }
                }
                AppError::DatabaseError(e)
            })?;
        Ok(())
    }
}

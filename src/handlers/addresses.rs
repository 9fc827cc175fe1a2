// src/handlers/addresses.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::address::{Address, AddressPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AddressSearchParams {
    /// Filtro exato por CEP (tem precedência sobre os demais).
    pub postal_code: Option<String>,
    /// Filtro exato por cidade.
    pub city: Option<String>,
    /// Filtro exato por UF.
    pub state: Option<String>,
}

// GET /api/addresses
#[utoipa::path(
    get,
    path = "/api/addresses",
    tag = "Endereços",
    responses(
        (status = 200, description = "Lista de endereços", body = Vec<Address>)
    )
)]
pub async fn list_addresses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let addresses = app_state.address_service.list().await?;
    Ok((StatusCode::OK, Json(addresses)))
}

// GET /api/addresses/search
#[utoipa::path(
    get,
    path = "/api/addresses/search",
    tag = "Endereços",
    params(AddressSearchParams),
    responses(
        (status = 200, description = "Endereços filtrados", body = Vec<Address>)
    )
)]
pub async fn search_addresses(
    State(app_state): State<AppState>,
    Query(params): Query<AddressSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let addresses = app_state
        .address_service
        .search(
            params.postal_code.as_deref(),
            params.city.as_deref(),
            params.state.as_deref(),
        )
        .await?;
    Ok((StatusCode::OK, Json(addresses)))
}

// GET /api/addresses/{id}
#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    tag = "Endereços",
    params(("id" = i64, Path, description = "ID do endereço")),
    responses(
        (status = 200, description = "Endereço encontrado", body = Address),
        (status = 404, description = "Endereço não encontrado")
    )
)]
pub async fn get_address(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let address = app_state
        .address_service
        .find(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(address)))
}

// POST /api/addresses
#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "Endereços",
    request_body = AddressPayload,
    responses(
        (status = 201, description = "Endereço criado", body = Address),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_address(
    State(app_state): State<AppState>,
    Json(payload): Json<AddressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let address = app_state
        .address_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}

// PUT /api/addresses/{id}
#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = "Endereços",
    params(("id" = i64, Path, description = "ID do endereço")),
    request_body = AddressPayload,
    responses(
        (status = 200, description = "Endereço atualizado", body = Address),
        (status = 404, description = "Endereço não encontrado")
    )
)]
pub async fn update_address(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let address = app_state
        .address_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(address)))
}

// DELETE /api/addresses/{id}
#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = "Endereços",
    params(("id" = i64, Path, description = "ID do endereço")),
    responses(
        (status = 204, description = "Endereço excluído"),
        (status = 404, description = "Endereço não encontrado"),
        (status = 409, description = "Endereço pertence a um cliente ou fornecedor")
    )
)]
pub async fn delete_address(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .address_service
        .delete(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

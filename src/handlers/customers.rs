// src/handlers/customers.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::customer::{Customer, CustomerPayload},
};

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.list().await?;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .find(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}

// GET /api/customers/tax-id/{tax_id}
#[utoipa::path(
    get,
    path = "/api/customers/tax-id/{tax_id}",
    tag = "Clientes",
    params(("tax_id" = String, Path, description = "CPF do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer_by_tax_id(
    State(app_state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.find_by_tax_id(&tax_id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF já cadastrado")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente excluído"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente possui vendas associadas")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .customer_service
        .delete(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

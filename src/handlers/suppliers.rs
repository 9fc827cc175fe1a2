// src/handlers/suppliers.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::supplier::{Supplier, SupplierPayload},
};

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Fornecedores",
    responses(
        (status = 200, description = "Lista de fornecedores", body = Vec<Supplier>)
    )
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.supplier_service.list().await?;
    Ok((StatusCode::OK, Json(suppliers)))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = app_state
        .supplier_service
        .find(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(supplier)))
}

// GET /api/suppliers/tax-id/{tax_id}
#[utoipa::path(
    get,
    path = "/api/suppliers/tax-id/{tax_id}",
    tag = "Fornecedores",
    params(("tax_id" = String, Path, description = "CNPJ do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn get_supplier_by_tax_id(
    State(app_state): State<AppState>,
    Path(tax_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = app_state.supplier_service.find_by_tax_id(&tax_id).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Fornecedores",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CNPJ já cadastrado")
    )
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = app_state
        .supplier_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = app_state
        .supplier_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(supplier)))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor excluído"),
        (status = 404, description = "Fornecedor não encontrado"),
        (status = 409, description = "Fornecedor possui produtos associados")
    )
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .supplier_service
        .delete(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

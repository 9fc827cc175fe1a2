// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sale::{LineItem, LineItemPayload, Sale, SalePayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodParams {
    /// Início do período (ISO-8601), inclusivo.
    pub start: DateTime<Utc>,
    /// Fim do período (ISO-8601), inclusivo.
    pub end: DateTime<Utc>,
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    responses(
        (status = 200, description = "Lista de vendas", body = Vec<Sale>)
    )
)]
pub async fn list_sales(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.list(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/customer/{customer_id}
#[utoipa::path(
    get,
    path = "/api/sales/customer/{customer_id}",
    tag = "Vendas",
    params(("customer_id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Vendas do cliente", body = Vec<Sale>)
    )
)]
pub async fn get_sales_by_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .sale_service
        .find_by_customer(&app_state.db_pool, customer_id)
        .await?;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/period
#[utoipa::path(
    get,
    path = "/api/sales/period",
    tag = "Vendas",
    params(PeriodParams),
    responses(
        (status = 200, description = "Vendas no período", body = Vec<Sale>)
    )
)]
pub async fn get_sales_by_period(
    State(app_state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .sale_service
        .find_by_period(&app_state.db_pool, params.start, params.end)
        .await?;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda encontrada", body = Sale),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.find(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = SalePayload,
    responses(
        (status = 201, description = "Venda criada com seus itens", body = Sale),
        (status = 400, description = "Dados inválidos ou cliente inexistente")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sale_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = SalePayload,
    responses(
        (status = 200, description = "Venda atualizada", body = Sale),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sale_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda e itens excluídos"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/sales/{id}/items
#[utoipa::path(
    post,
    path = "/api/sales/{id}/items",
    tag = "Vendas",
    params(("id" = i64, Path, description = "ID da venda")),
    request_body = LineItemPayload,
    responses(
        (status = 201, description = "Item adicionado à venda", body = LineItem),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn add_sale_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LineItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .sale_service
        .add_line_item(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// DELETE /api/sales/{id}/items/{item_id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}/items/{item_id}",
    tag = "Vendas",
    params(
        ("id" = i64, Path, description = "ID da venda"),
        ("item_id" = i64, Path, description = "ID do item")
    ),
    responses(
        (status = 204, description = "Item removido da venda"),
        (status = 404, description = "Venda ou item não encontrado")
    )
)]
pub async fn remove_sale_item(
    State(app_state): State<AppState>,
    Path((id, item_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .sale_service
        .remove_line_item(&app_state.db_pool, id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

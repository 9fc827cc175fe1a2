// src/handlers/line_items.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::sale::{LineItem, StandaloneLineItemPayload},
};

// GET /api/line-items
#[utoipa::path(
    get,
    path = "/api/line-items",
    tag = "Itens de Venda",
    responses(
        (status = 200, description = "Lista de itens de venda", body = Vec<LineItem>)
    )
)]
pub async fn list_line_items(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.line_item_service.list().await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/line-items/sale/{sale_id}
#[utoipa::path(
    get,
    path = "/api/line-items/sale/{sale_id}",
    tag = "Itens de Venda",
    params(("sale_id" = i64, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Itens da venda", body = Vec<LineItem>)
    )
)]
pub async fn get_line_items_by_sale(
    State(app_state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .line_item_service
        .find_by_sale(&app_state.db_pool, sale_id)
        .await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/line-items/product/{product_id}
#[utoipa::path(
    get,
    path = "/api/line-items/product/{product_id}",
    tag = "Itens de Venda",
    params(("product_id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Itens que referenciam o produto", body = Vec<LineItem>)
    )
)]
pub async fn get_line_items_by_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .line_item_service
        .find_by_product(product_id)
        .await?;
    Ok((StatusCode::OK, Json(items)))
}

// GET /api/line-items/{id}
#[utoipa::path(
    get,
    path = "/api/line-items/{id}",
    tag = "Itens de Venda",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item encontrado", body = LineItem),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn get_line_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .line_item_service
        .find(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

// POST /api/line-items
#[utoipa::path(
    post,
    path = "/api/line-items",
    tag = "Itens de Venda",
    request_body = StandaloneLineItemPayload,
    responses(
        (status = 201, description = "Item criado", body = LineItem),
        (status = 400, description = "Dados inválidos ou referências inexistentes")
    )
)]
pub async fn create_line_item(
    State(app_state): State<AppState>,
    Json(payload): Json<StandaloneLineItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .line_item_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/line-items/{id}
#[utoipa::path(
    put,
    path = "/api/line-items/{id}",
    tag = "Itens de Venda",
    params(("id" = i64, Path, description = "ID do item")),
    request_body = StandaloneLineItemPayload,
    responses(
        (status = 200, description = "Item atualizado, subtotal recalculado", body = LineItem),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn update_line_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StandaloneLineItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .line_item_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/line-items/{id}
#[utoipa::path(
    delete,
    path = "/api/line-items/{id}",
    tag = "Itens de Venda",
    params(("id" = i64, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item excluído"),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn delete_line_item(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .line_item_service
        .delete(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/products.rs

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
    models::product::{Product, ProductPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearchParams {
    /// Trecho do nome, sem diferenciar maiúsculas de minúsculas.
    pub name: String,
}

fn default_threshold() -> i32 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockParams {
    /// Limite de estoque (comparação estrita `<`). Padrão: 10.
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    responses(
        (status = 200, description = "Lista de produtos", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list().await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/search
#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Produtos",
    params(NameSearchParams),
    responses(
        (status = 200, description = "Produtos com o trecho no nome", body = Vec<Product>)
    )
)]
pub async fn search_products(
    State(app_state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.search_by_name(&params.name).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/supplier/{supplier_id}
#[utoipa::path(
    get,
    path = "/api/products/supplier/{supplier_id}",
    tag = "Produtos",
    params(("supplier_id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Produtos do fornecedor", body = Vec<Product>)
    )
)]
pub async fn get_products_by_supplier(
    State(app_state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.find_by_supplier(supplier_id).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/low-stock
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Produtos",
    params(LowStockParams),
    responses(
        (status = 200, description = "Produtos com estoque abaixo do limite", body = Vec<Product>)
    )
)]
pub async fn get_low_stock_products(
    State(app_state): State<AppState>,
    Query(params): Query<LowStockParams>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.find_low_stock(params.threshold).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .product_service
        .find(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .product_service
        .create(&app_state.db_pool, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .product_service
        .update(&app_state.db_pool, id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Produto possui itens de venda associados")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .product_service
        .delete(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

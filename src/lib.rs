// src/lib.rs

// Declaração dos nossos módulos
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;

/// Monta o router completo da aplicação sobre um estado já construído.
/// Compartilhado entre o `main` e os testes de integração.
pub fn app(app_state: AppState) -> Router {
    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            "/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/tax-id/{tax_id}",
            get(handlers::customers::get_customer_by_tax_id),
        );

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route(
            "/tax-id/{tax_id}",
            get(handlers::suppliers::get_supplier_by_tax_id),
        );

    let address_routes = Router::new()
        .route(
            "/",
            get(handlers::addresses::list_addresses).post(handlers::addresses::create_address),
        )
        .route("/search", get(handlers::addresses::search_addresses))
        .route(
            "/{id}",
            get(handlers::addresses::get_address)
                .put(handlers::addresses::update_address)
                .delete(handlers::addresses::delete_address),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/search", get(handlers::products::search_products))
        .route(
            "/supplier/{supplier_id}",
            get(handlers::products::get_products_by_supplier),
        )
        .route("/low-stock", get(handlers::products::get_low_stock_products))
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    let sale_routes = Router::new()
        .route(
            "/",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/customer/{customer_id}", get(handlers::sales::get_sales_by_customer))
        .route("/period", get(handlers::sales::get_sales_by_period))
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route("/{id}/items", axum::routing::post(handlers::sales::add_sale_item))
        .route(
            "/{id}/items/{item_id}",
            axum::routing::delete(handlers::sales::remove_sale_item),
        );

    let line_item_routes = Router::new()
        .route(
            "/",
            get(handlers::line_items::list_line_items).post(handlers::line_items::create_line_item),
        )
        .route("/sale/{sale_id}", get(handlers::line_items::get_line_items_by_sale))
        .route(
            "/product/{product_id}",
            get(handlers::line_items::get_line_items_by_product),
        )
        .route(
            "/{id}",
            get(handlers::line_items::get_line_item)
                .put(handlers::line_items::update_line_item)
                .delete(handlers::line_items::delete_line_item),
        );

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/customers", customer_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/addresses", address_routes)
        .nest("/api/products", product_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/line-items", line_item_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
}

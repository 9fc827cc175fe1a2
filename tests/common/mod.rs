#![allow(dead_code)]

use std::str::FromStr;

use comercio_api::config::{AppState, DeletePolicy};
use comercio_api::models::address::AddressPayload;
use comercio_api::models::customer::CustomerPayload;
use comercio_api::models::product::ProductPayload;
use comercio_api::models::sale::{LineItemPayload, SalePayload};
use comercio_api::models::supplier::SupplierPayload;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

// Um banco em memória isolado por caso de teste, com FKs ligadas e o esquema
// aplicado. A conexão única mantém o banco vivo enquanto a pool existir.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("URL de banco inválida")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Falha ao abrir o banco em memória");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao rodar as migrações");

    pool
}

pub async fn test_state() -> AppState {
    AppState::with_pool(test_pool().await, DeletePolicy::Permissive)
}

pub async fn test_state_with_policy(policy: DeletePolicy) -> AppState {
    AppState::with_pool(test_pool().await, policy)
}

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal inválido")
}

pub fn address_payload() -> AddressPayload {
    AddressPayload {
        postal_code: Some("01310-000".to_string()),
        street: Some("Av. Paulista".to_string()),
        number: Some("2000".to_string()),
        complement: None,
        district: Some("Bela Vista".to_string()),
        city: Some("São Paulo".to_string()),
        state: Some("SP".to_string()),
        country: None,
    }
}

pub fn customer_payload(name: &str, tax_id: &str) -> CustomerPayload {
    CustomerPayload {
        name: Some(name.to_string()),
        tax_id: Some(tax_id.to_string()),
        phone: Some("(11) 91234-5678".to_string()),
        email: None,
        address: Some(address_payload()),
    }
}

pub fn supplier_payload(name: &str, tax_id: &str) -> SupplierPayload {
    SupplierPayload {
        name: Some(name.to_string()),
        tax_id: Some(tax_id.to_string()),
        phone: Some("(11) 1234-5678".to_string()),
        email: None,
        address: Some(address_payload()),
    }
}

pub fn product_payload(name: &str, stock_quantity: i32, supplier_id: Option<i64>) -> ProductPayload {
    ProductPayload {
        name: Some(name.to_string()),
        description: None,
        price: Some(dec("99.90")),
        stock_quantity: Some(stock_quantity),
        supplier_id,
    }
}

pub fn line_item_payload(product_id: i64, quantity: i32, unit_price: &str) -> LineItemPayload {
    LineItemPayload {
        product_id: Some(product_id),
        quantity: Some(quantity),
        unit_price: Some(dec(unit_price)),
    }
}

pub fn sale_payload(customer_id: i64, total_amount: &str, items: Vec<LineItemPayload>) -> SalePayload {
    SalePayload {
        customer_id: Some(customer_id),
        sale_date: None,
        total_amount: Some(dec(total_amount)),
        items,
    }
}

// src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

/// Produto disponível para venda.
///
/// O estoque é um contador simples: a criação de uma venda nunca o decrementa.
/// `supplier_id` é o lado dono da associação Produto↔Fornecedor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    pub name: String,

    pub description: Option<String>,

    /// Preço de catálogo atual; o histórico de preço vive no item de venda.
    pub price: Option<Decimal>,

    pub stock_quantity: i32,

    pub supplier_id: Option<i64>,
}

// `price` é TEXT no banco (ver models.rs), então a conversão é manual.
impl FromRow<'_, SqliteRow> for Product {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: crate::models::decimal_opt_column(row, "price")?,
            stock_quantity: row.try_get("stock_quantity")?,
            supplier_id: row.try_get("supplier_id")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(
        required(message = "O nome é obrigatório"),
        length(min = 1, message = "O nome não pode ser vazio")
    )]
    #[schema(example = "Notebook Dell")]
    pub name: Option<String>,

    pub description: Option<String>,

    #[schema(example = 4500.0)]
    pub price: Option<Decimal>,

    #[validate(
        required(message = "A quantidade em estoque é obrigatória"),
        range(min = 0, message = "A quantidade em estoque não pode ser negativa")
    )]
    #[schema(example = 5)]
    pub stock_quantity: Option<i32>,

    pub supplier_id: Option<i64>,
}

// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

/// Venda realizada na loja.
///
/// Referencia exatamente um cliente (FK obrigatória) e é dona dos seus itens:
/// excluir a venda exclui todos os itens junto.
///
/// `total_amount` é informado pelo chamador e NÃO é recalculado a partir dos
/// itens — diferente do subtotal de cada item, que é sempre derivado. Essa
/// assimetria é intencional e deve ser mantida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,

    pub customer_id: i64,

    /// Preenchida com o instante atual quando ausente na criação; nunca
    /// recalculada em atualização.
    pub sale_date: DateTime<Utc>,

    pub total_amount: Decimal,

    /// Itens pertencentes à venda (agregado dono).
    pub items: Vec<LineItem>,
}

// Linha da tabela `sales`; os itens são hidratados pelo repositório com a
// consulta reversa por `sale_id`.
impl FromRow<'_, SqliteRow> for Sale {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            sale_date: row.try_get("sale_date")?,
            total_amount: crate::models::decimal_column(row, "total_amount")?,
            items: Vec::new(),
        })
    }
}

/// Item de venda: a entidade associativa entre venda e produto.
///
/// `unit_price` é o preço histórico no momento da venda, independente do preço
/// atual do produto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: i64,

    pub sale_id: i64,

    pub product_id: i64,

    pub quantity: i32,

    pub unit_price: Decimal,

    /// Derivado: quantity * unit_price, recalculado a cada gravação.
    pub subtotal: Option<Decimal>,
}

impl FromRow<'_, SqliteRow> for LineItem {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sale_id: row.try_get("sale_id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            unit_price: crate::models::decimal_column(row, "unit_price")?,
            subtotal: crate::models::decimal_opt_column(row, "subtotal")?,
        })
    }
}

/// Subtotal de um item: quantity * unit_price.
///
/// Com qualquer entrada ausente o resultado fica indefinido (`None`) — estado
/// "ainda não calculável", não um erro. Chamado imediatamente antes de cada
/// inserção e de cada atualização de item.
pub fn line_subtotal(quantity: Option<i32>, unit_price: Option<Decimal>) -> Option<Decimal> {
    match (quantity, unit_price) {
        (Some(quantity), Some(unit_price)) => Some(unit_price * Decimal::from(quantity)),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    #[validate(required(message = "A venda deve ter um cliente"))]
    pub customer_id: Option<i64>,

    /// Quando omitida, a data é preenchida no momento da inserção.
    pub sale_date: Option<DateTime<Utc>>,

    #[validate(required(message = "O valor total é obrigatório"))]
    #[schema(example = 150.0)]
    pub total_amount: Option<Decimal>,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<LineItemPayload>,
}

/// Item embutido no payload da venda ou criado avulso via `/api/line-items`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    #[validate(required(message = "O item deve referenciar um produto"))]
    pub product_id: Option<i64>,

    #[validate(
        required(message = "A quantidade é obrigatória"),
        range(min = 1, message = "A quantidade deve ser positiva")
    )]
    #[schema(example = 2)]
    pub quantity: Option<i32>,

    /// Preço praticado no momento da venda.
    #[validate(required(message = "O preço unitário é obrigatório"))]
    #[schema(example = 75.0)]
    pub unit_price: Option<Decimal>,
}

/// Payload do endpoint avulso de itens, que precisa apontar a venda dona.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StandaloneLineItemPayload {
    #[validate(required(message = "O item deve pertencer a uma venda"))]
    pub sale_id: Option<i64>,

    #[validate(nested)]
    #[serde(flatten)]
    pub item: LineItemPayload,
}

// src/models/supplier.rs

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::address::{Address, AddressPayload};

/// Fornecedor de produtos da loja.
///
/// Mesmo padrão do cliente: dono exclusivo de um endereço, e os produtos
/// fornecidos (lado não-dono) são consultados via `find_by_supplier_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,

    pub name: String,

    /// CNPJ, único no banco. Formato: 12.345.678/0001-99.
    pub tax_id: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub address: Option<Address>,
}

// Linha do SELECT com LEFT JOIN de `addresses` (prefixo `a_`, ver
// `db::supplier_repo::SUPPLIER_SELECT`).
impl FromRow<'_, SqliteRow> for Supplier {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let address = match row.try_get::<Option<i64>, _>("a_id")? {
            Some(address_id) => Some(Address {
                id: address_id,
                postal_code: row.try_get("a_postal_code")?,
                street: row.try_get("a_street")?,
                number: row.try_get("a_number")?,
                complement: row.try_get("a_complement")?,
                district: row.try_get("a_district")?,
                city: row.try_get("a_city")?,
                state: row.try_get("a_state")?,
                country: row.try_get("a_country")?,
            }),
            None => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            tax_id: row.try_get("tax_id")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            address,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(
        required(message = "O nome é obrigatório"),
        length(min = 1, message = "O nome não pode ser vazio")
    )]
    #[schema(example = "Dell Computadores Ltda")]
    pub name: Option<String>,

    #[schema(example = "12.345.678/0001-99")]
    pub tax_id: Option<String>,

    #[schema(example = "(11) 1234-5678")]
    pub phone: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "contato@dell.com")]
    pub email: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressPayload>,
}

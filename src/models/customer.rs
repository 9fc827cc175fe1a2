// src/models/customer.rs

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::address::{Address, AddressPayload};

/// Cliente da loja.
///
/// Dono exclusivo de um endereço (cascata em todas as operações + remoção de
/// órfão). As vendas do cliente são o lado não-dono da associação e não ficam
/// embutidas aqui: são recomputadas sob demanda via `find_by_customer_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,

    pub name: String,

    /// CPF, único no banco. Formato: 123.456.789-00.
    pub tax_id: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub address: Option<Address>,
}

// Linha do SELECT com LEFT JOIN de `addresses` (colunas do endereço com
// prefixo `a_`, ver `db::customer_repo::CUSTOMER_SELECT`).
impl FromRow<'_, SqliteRow> for Customer {
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

/// Corpo de criação/atualização de cliente. O endereço embutido é persistido
/// junto, na mesma transação.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(
        required(message = "O nome é obrigatório"),
        length(min = 1, message = "O nome não pode ser vazio")
    )]
    #[schema(example = "João Silva")]
    pub name: Option<String>,

    #[schema(example = "123.456.789-00")]
    pub tax_id: Option<String>,

    #[schema(example = "(11) 91234-5678")]
    pub phone: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "joao@exemplo.com")]
    pub email: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressPayload>,
}

// src/models/address.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Endereço físico completo.
///
/// Um endereço pertence exclusivamente a um único cliente OU a um único
/// fornecedor; a FK fica na tabela do dono. Excluir o dono exclui o endereço,
/// e um endereço desvinculado do dono é removido como órfão.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,

    /// CEP, formato 12345-678.
    pub postal_code: Option<String>,

    /// Logradouro (Rua, Avenida, etc.)
    pub street: Option<String>,

    pub number: Option<String>,

    /// Complemento (Ex: "Apto 101", "Bloco B")
    pub complement: Option<String>,

    pub district: Option<String>,

    pub city: Option<String>,

    /// UF, sempre 2 caracteres.
    pub state: Option<String>,

    pub country: String,
}

impl Address {
    /// Endereço completo em uma linha, para relatórios e comprovantes.
    ///
    /// Ex: "Rua das Flores, 1000, Apto 101 - Centro - São Paulo/SP - CEP: 12345-678"
    pub fn full_address(&self) -> String {
        let mut formatted = String::new();

        if let Some(street) = &self.street {
            formatted.push_str(street);
        }

        if let Some(number) = &self.number {
            formatted.push_str(", ");
            formatted.push_str(number);
        }

        if let Some(complement) = &self.complement {
            if !complement.is_empty() {
                formatted.push_str(", ");
                formatted.push_str(complement);
            }
        }

        if let Some(district) = &self.district {
            formatted.push_str(" - ");
            formatted.push_str(district);
        }

        if let (Some(city), Some(state)) = (&self.city, &self.state) {
            formatted.push_str(" - ");
            formatted.push_str(city);
            formatted.push('/');
            formatted.push_str(state);
        }

        if let Some(postal_code) = &self.postal_code {
            formatted.push_str(" - CEP: ");
            formatted.push_str(postal_code);
        }

        formatted
    }
}

/// Corpo de criação/atualização de endereço, também usado embutido nos
/// payloads de cliente e fornecedor.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[schema(example = "01310-000")]
    pub postal_code: Option<String>,

    #[schema(example = "Av. Paulista")]
    pub street: Option<String>,

    #[schema(example = "2000")]
    pub number: Option<String>,

    pub complement: Option<String>,

    #[schema(example = "Bela Vista")]
    pub district: Option<String>,

    #[schema(example = "São Paulo")]
    pub city: Option<String>,

    #[validate(length(equal = 2, message = "A UF deve ter exatamente 2 caracteres"))]
    #[schema(example = "SP")]
    pub state: Option<String>,

    /// Padrão "Brasil" quando omitido.
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_address() -> Address {
        Address {
            id: 1,
            postal_code: Some("12345-678".to_string()),
            street: Some("Rua das Flores".to_string()),
            number: Some("1000".to_string()),
            complement: Some("Apto 101".to_string()),
            district: Some("Centro".to_string()),
            city: Some("São Paulo".to_string()),
            state: Some("SP".to_string()),
            country: "Brasil".to_string(),
        }
    }

    #[test]
    fn full_address_formats_every_part() {
        assert_eq!(
            base_address().full_address(),
            "Rua das Flores, 1000, Apto 101 - Centro - São Paulo/SP - CEP: 12345-678"
        );
    }

    #[test]
    fn full_address_skips_missing_parts() {
        let address = Address {
            complement: None,
            district: None,
            postal_code: None,
            ..base_address()
        };
        assert_eq!(address.full_address(), "Rua das Flores, 1000 - São Paulo/SP");
    }

    #[test]
    fn full_address_needs_city_and_state_together() {
        let address = Address {
            state: None,
            complement: None,
            district: None,
            postal_code: None,
            ..base_address()
        };
        // Cidade sem UF não entra no trecho "cidade/UF".
        assert_eq!(address.full_address(), "Rua das Flores, 1000");
    }
}

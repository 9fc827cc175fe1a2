use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As variantes são o que a camada de modelo devolve; quem traduz para status
// HTTP é o `IntoResponse` abaixo, nunca os serviços.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationFailure(#[from] validator::ValidationErrors),

    #[error("Campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    // Referência a uma entidade que não existe (ex: venda sem cliente).
    // Rejeitada antes de chegar ao banco; nunca persiste pendurada.
    #[error("Referência inválida: {0}")]
    InvalidReference(&'static str),

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Registro duplicado: {0}")]
    DuplicateKey(String),

    // Exclusão barrada por registros dependentes, seja pela checagem da
    // política de exclusão, seja pela FK do próprio banco.
    #[error("Violação de integridade referencial: {0}")]
    ReferentialIntegrityViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationFailure(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Campo obrigatório ausente: {field}."),
            ),
            AppError::InvalidReference(field) => (
                StatusCode::BAD_REQUEST,
                format!("Referência inválida: {field}."),
            ),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} não encontrado."))
            }
            AppError::DuplicateKey(detail) => (StatusCode::CONFLICT, detail),
            AppError::ReferentialIntegrityViolation(detail) => (StatusCode::CONFLICT, detail),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

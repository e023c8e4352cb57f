// errors.rs
use astra::Response;
use thiserror::Error;

use crate::integrations::IntegrationError;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, integrations).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Upstream Error: {0}")]
    Upstream(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream(_) => 502,
            ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => {
                500
            }
        }
    }

    /// Message safe to show to a visitor. Database details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Página não encontrada".to_string(),
            ServerError::BadRequest(msg) => msg.clone(),
            ServerError::Upstream(msg) => format!("Serviço externo indisponível: {msg}"),
            ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => {
                "Erro interno do servidor".to_string()
            }
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<IntegrationError> for ServerError {
    fn from(e: IntegrationError) -> Self {
        ServerError::Upstream(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

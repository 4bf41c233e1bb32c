/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Storage(tally_storage::StorageError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<tally_storage::StorageError> for ServerError {
    fn from(err: tally_storage::StorageError) -> Self {
        use tally_storage::StorageError;
        match err {
            StorageError::Duplicate(what) => ServerError::Conflict(format!("{what} already exists")),
            StorageError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} not found: {id}"))
            }
            other => ServerError::Storage(other),
        }
    }
}

impl From<tally_core::TallyError> for ServerError {
    fn from(err: tally_core::TallyError) -> Self {
        use tally_core::TallyError;
        match err {
            TallyError::InvalidInput(msg) => ServerError::Validation(msg),
            TallyError::Duplicate(what) => ServerError::Conflict(format!("{what} already exists")),
            TallyError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{entity} not found: {id}"))
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::InvalidCredentials => {
                // Same status and body whether the username or the password
                // was wrong
                (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
            }
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ServerError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Invalid or expired token".to_string(),
            ),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Storage(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::error!("JWT error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Token error".to_string(),
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use records::{CartError, RecordsError, SaleError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid input")]
    Invalid(Vec<String>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error(transparent)]
    Sale(#[from] SaleError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Storage error: {0}")]
    Records(#[from] RecordsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload | AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Sale(SaleError::InsufficientStock { .. }) => StatusCode::CONFLICT,
            AppError::Sale(_) => StatusCode::BAD_REQUEST,
            AppError::Cart(CartError::InsufficientStock { .. }) => StatusCode::CONFLICT,
            AppError::Cart(CartError::NotInCart(_)) => StatusCode::NOT_FOUND,
            AppError::Cart(CartError::InvalidQuantity) => StatusCode::BAD_REQUEST,
            AppError::Records(_) | AppError::Config(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Invalid(errors) => json!({ "message": self.to_string(), "errors": errors }),
            _ if status.is_server_error() => {
                error!("{self}");
                json!({ "message": "Internal server error" })
            }
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

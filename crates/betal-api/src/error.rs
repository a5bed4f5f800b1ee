//! Tales of Betal: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use betal_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid, or the catalog or state
    /// directory it names cannot be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

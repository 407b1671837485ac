use crate::domain::validation::ValidationError;
use crate::storage::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Which operation failed. Picks the message shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Create,
    List,
    Get,
}

impl StoreOperation {
    #[must_use]
    pub const fn public_message(self) -> &'static str {
        match self {
            Self::Create => "Terjadi kesalahan. Silakan coba lagi.",
            Self::List | Self::Get => "Terjadi kesalahan saat mengambil data.",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
        })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Store error during {op}: {source}")]
    Storage {
        op: StoreOperation,
        #[source]
        source: StoreError,
    },
    #[error("Too many submissions")]
    Throttled,
    #[error("Internal server error during {0}")]
    Internal(StoreOperation),
}

pub const THROTTLED_MESSAGE: &str = "Terlalu banyak permintaan. Silakan coba lagi nanti.";

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(e) => {
                tracing::debug!(issues = e.issues().len(), message = %e, "Validation failed");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::Storage { op, source } => {
                tracing::error!(error = %source, operation = %op, "Inquiry store error");
                (StatusCode::INTERNAL_SERVER_ERROR, op.public_message().to_string())
            }
            Self::Throttled => (StatusCode::TOO_MANY_REQUESTS, THROTTLED_MESSAGE.to_string()),
            Self::Internal(op) => {
                tracing::error!(operation = %op, "Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, op.public_message().to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message
        }));

        (status, body).into_response()
    }
}

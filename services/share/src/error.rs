//! Custom error types for the share service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the share service
#[derive(Error, Debug)]
pub enum ShareError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// The caller's role does not grant the required permission
    #[error("Forbidden")]
    Forbidden,

    /// Token or project not known to any backend
    ///
    /// Deliberately worded without claiming expiry: shares have no TTL,
    /// so a missing record means unknown or revoked, nothing else.
    #[error("Share link not found")]
    NotFound,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl From<StoreError> for ShareError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ShareError::NotFound,
            other => {
                tracing::error!("Share store error: {}", other);
                ShareError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ShareError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ShareError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ShareError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ShareError::NotFound => (StatusCode::NOT_FOUND, "Share link not found".to_string()),
            ShareError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ShareError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for share service results
pub type ShareResult<T> = Result<T, ShareError>;

//! Custom error types for the access service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the access service
#[derive(Error, Debug)]
pub enum AccessError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// The caller's role does not grant the required permission
    #[error("Forbidden")]
    Forbidden,

    /// Project or member not found
    #[error("Not found")]
    NotFound,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request conflicts with existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AccessError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AccessError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            AccessError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AccessError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AccessError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AccessError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AccessError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for access service results
pub type AccessResult<T> = Result<T, AccessError>;

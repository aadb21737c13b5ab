//! Custom error types for the common library
//!
//! This module defines the error types shared by the dashboard services:
//! database failures and the share-store backend failures.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Custom error type for the share-link key-value backends
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record exists for the requested token in any backend
    #[error("Share link not found")]
    NotFound,

    /// The backend itself failed (connection refused, timeout, bad reply)
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A record or blob could not be serialized or deserialized
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local filesystem error
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

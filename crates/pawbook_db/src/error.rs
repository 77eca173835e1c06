//! Error types for the database client

use pawbook_common::error::PawbookError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error decoding a row into a domain model
    #[error("Database decode error: {0}")]
    DecodeError(String),
}

impl From<DbError> for PawbookError {
    fn from(err: DbError) -> Self {
        PawbookError::DatabaseError(err.to_string())
    }
}

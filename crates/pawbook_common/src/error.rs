// --- File: crates/pawbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Pawbook errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for PawbookError.
#[derive(Error, Debug)]
pub enum PawbookError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Error that doesn't fit into any other category
    #[error("Other error: {0}")]
    OtherError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for PawbookError {
    fn status_code(&self) -> u16 {
        match self {
            PawbookError::ParseError(_) => 400,
            PawbookError::ConfigError(_) => 500,
            PawbookError::AuthError(_) => 401,
            PawbookError::ValidationError(_) => 400,
            PawbookError::DatabaseError(_) => 500,
            PawbookError::ConflictError(_) => 409,
            PawbookError::NotFoundError(_) => 404,
            PawbookError::InternalError(_) => 500,
            PawbookError::OtherError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for PawbookError {
    fn from(err: serde_json::Error) -> Self {
        PawbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for PawbookError {
    fn from(err: std::io::Error) -> Self {
        PawbookError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> PawbookError {
    PawbookError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> PawbookError {
    PawbookError::NotFoundError(message.to_string())
}

//! Error types for the recipe book service.

use thiserror::Error;

/// Result type alias using the recipe book's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for recipe store and validation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Store connection not yet established, closed, or lost
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Identifier has no matching document
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier is not well-formed for the store's identifier format
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Submission is missing required fields
    #[error("{message}")]
    ValidationFailed {
        message: String,
        missing: Vec<&'static str>,
    },

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Not-found error for a recipe identifier.
    pub fn recipe_not_found(id: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("Recipe {} not found", id))
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => {
                Error::StoreUnavailable("timed out acquiring a store connection".to_string())
            }
            sqlx::Error::PoolClosed => {
                Error::StoreUnavailable("store connection pool is closed".to_string())
            }
            sqlx::Error::Io(io) => Error::StoreUnavailable(io.to_string()),
            sqlx::Error::Tls(tls) => Error::StoreUnavailable(tls.to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

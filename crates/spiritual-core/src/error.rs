//! Core error types.

use thiserror::Error;

/// Errors raised by the domain model and the storage backends.
#[derive(Debug, Error)]
pub enum Error {
    /// SQLite backend error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A list or JSON column could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An input form failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A uniqueness or foreign key constraint would be violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Common error types for Bookwell

use thiserror::Error;

/// Common result type for Bookwell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Bookwell backend
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or invalid request input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A referential precondition does not hold (e.g. missing association)
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Scheduling overlap or duplicate unique association
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

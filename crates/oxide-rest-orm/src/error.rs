//! Error types for the ORM.

use thiserror::Error;

/// ORM-specific errors.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure reported by a driver that does not use sqlx.
    #[error("driver error: {0}")]
    Driver(String),

    /// The role has no access to any field of the model.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A write payload carries no fields.
    #[error("empty payload")]
    EmptyPayload,

    /// A write payload names a field that cannot be written, or carries a
    /// value the field rejects.
    #[error("invalid field: {0}")]
    InvalidField(String),
}

/// Result type alias for ORM operations.
pub type Result<T> = std::result::Result<T, OrmError>;

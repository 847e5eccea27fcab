//! Storage-layer error model.
//!
//! Constraint rejections and storage failures are distinct so callers can
//! show "not enough stock"-class messages separately from system errors.
//! Insufficient stock is not an error at all: it is the `Rejected` variant of
//! the operation outcome enums.

use thiserror::Error;

use clothier_core::DomainError;

/// Result type used across the storage layer.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write was rejected before it happened (e.g. negative quantity).
    /// The enclosing transaction is rolled back; nothing is persisted.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The referenced row does not exist.
    #[error("not found")]
    NotFound,

    /// Underlying store failure (I/O, corruption). Fatal to the current
    /// operation; rolled back and surfaced, never retried automatically.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => StoreError::NotFound,
            other => StoreError::Constraint(other.to_string()),
        }
    }
}

// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Disallowed status change, stale idea version or duplicate key.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Storage failure; the detail is logged, never shown to clients.
    #[error("persistence error: {0}")]
    Persistence(String),
}

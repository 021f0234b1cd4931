// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures surfaced by application services. Domain errors pass through
/// untouched so the HTTP layer can tell a stale idea version from a missing one.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, expired or revoked credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but lacking the capability or college scope.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}

impl From<csv::Error> for ApplicationError {
    fn from(err: csv::Error) -> Self {
        Self::Infrastructure(format!("csv: {err}"))
    }
}

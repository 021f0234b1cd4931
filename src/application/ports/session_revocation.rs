// src/application/ports/session_revocation.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Sessions ended by logout. Every bearer token names its session, and a token
/// whose session is listed here no longer authenticates.
#[async_trait]
pub trait SessionRevocationStore: Send + Sync {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool>;

    /// Idempotent; revoking an unknown or already revoked session succeeds.
    async fn revoke(&self, session_id: &str) -> ApplicationResult<()>;
}

use crate::application::ports::session_revocation::SessionRevocationStore;
use crate::application::{ApplicationResult, error::ApplicationError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Process-local revocation list. Revocations do not survive a restart, but
/// neither do tokens outlive their TTL.
#[derive(Default)]
pub struct InMemorySessionRevocationStore {
    revoked: Mutex<HashSet<String>>,
}

impl InMemorySessionRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn revoked(&self) -> ApplicationResult<MutexGuard<'_, HashSet<String>>> {
        self.revoked
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionRevocationStore for InMemorySessionRevocationStore {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool> {
        Ok(self.revoked()?.contains(session_id))
    }

    async fn revoke(&self, session_id: &str) -> ApplicationResult<()> {
        self.revoked()?.insert(session_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn revoked_sessions_are_remembered() {
        let store = InMemorySessionRevocationStore::new();
        assert!(!store.is_revoked("a").await.unwrap());
        store.revoke("a").await.unwrap();
        assert!(store.is_revoked("a").await.unwrap());
        assert!(!store.is_revoked("b").await.unwrap());
    }
}

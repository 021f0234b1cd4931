// src/application/services/audit_trail.rs
use std::sync::Arc;

use tracing::warn;

use crate::application::{
    dto::{AuthenticatedUser, RequestContext},
    ports::time::Clock,
};
use crate::domain::audit::{AuditAction, AuditLogRepository, NewAuditLogEntry};

/// Appends audit entries on behalf of application services. A failed write is
/// logged and dropped so it never fails the action being audited.
pub struct AuditTrail {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditTrail {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Starts an entry attributed to `actor` and carrying the client details.
    pub fn entry(
        actor: &AuthenticatedUser,
        ctx: &RequestContext,
        action: AuditAction,
        resource_type: &str,
        description: impl Into<String>,
    ) -> NewAuditLogEntry {
        NewAuditLogEntry::new(action, resource_type, description)
            .by_user(actor.id, actor.username.clone())
            .client(ctx.ip_address.clone(), ctx.user_agent.clone())
    }

    pub async fn record(&self, mut entry: NewAuditLogEntry) {
        if entry.created_at.is_none() {
            entry.created_at = Some(self.clock.now());
        }
        let action = entry.action;
        if let Err(err) = self.repo.insert(entry).await {
            warn!(%action, error = %err, "failed to record audit entry");
        }
    }
}

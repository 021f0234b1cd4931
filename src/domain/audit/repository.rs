use crate::domain::audit::entity::{AuditLogEntry, NewAuditLogEntry};
use crate::domain::audit::filter::AuditLogFilter;
use crate::domain::cursor::PageCursor;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Append-only store; entries are never updated or deleted.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, entry: NewAuditLogEntry) -> DomainResult<AuditLogEntry>;

    /// Newest first.
    async fn list(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditLogEntry>, Option<PageCursor>)>;

    /// Matching entries, newest first, at most `max_rows` of them.
    async fn export(
        &self,
        filter: &AuditLogFilter,
        max_rows: u32,
    ) -> DomainResult<Vec<AuditLogEntry>>;
}

use super::{AuditLogCriteria, AuditQueryService};
use crate::application::{
    capability::ensure_capability,
    dto::{AuditLogDto, AuthenticatedUser, CursorPage, pagination::normalize_limit},
    error::ApplicationResult,
    queries::decode_cursor,
};

pub struct ListAuditLogsQuery {
    pub criteria: AuditLogCriteria,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    /// Newest first. Dropping a criterion widens the result back to the
    /// unfiltered order.
    pub async fn list_audit_logs(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        ensure_capability(actor, "audit", "read")?;
        let filter = query.criteria.into_filter()?;
        let cursor = decode_cursor(query.cursor.as_deref())?;

        let (items, next) = self
            .repo
            .list(&filter, normalize_limit(query.limit), cursor)
            .await?;
        Ok(CursorPage::from_domain(items, next))
    }
}

use std::sync::Arc;

use crate::application::{ports::time::Clock, services::audit_trail::AuditTrail};
use crate::domain::audit::AuditLogRepository;

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) audit: Arc<AuditTrail>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AuditQueryService {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        audit: Arc<AuditTrail>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, audit, clock }
    }
}

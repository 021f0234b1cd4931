use std::sync::Arc;

use crate::application::{ports::time::Clock, services::audit_trail::AuditTrail};
use crate::domain::notification::NotificationRepository;

pub struct NotificationCommandService {
    pub(super) repo: Arc<dyn NotificationRepository>,
    pub(super) audit: Arc<AuditTrail>,
    pub(super) clock: Arc<dyn Clock>,
}

impl NotificationCommandService {
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        audit: Arc<AuditTrail>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, audit, clock }
    }
}

use std::sync::Arc;

use crate::application::{
    commands::notifications::NotificationCommandService, error::ApplicationError,
    error::ApplicationResult, ports::time::Clock, services::audit_trail::AuditTrail,
};
use crate::domain::idea::{Idea, IdeaId, IdeaRepository};

pub struct IdeaCommandService {
    pub(super) idea_repo: Arc<dyn IdeaRepository>,
    pub(super) notifications: Arc<NotificationCommandService>,
    pub(super) audit: Arc<AuditTrail>,
    pub(super) clock: Arc<dyn Clock>,
}

impl IdeaCommandService {
    pub fn new(
        idea_repo: Arc<dyn IdeaRepository>,
        notifications: Arc<NotificationCommandService>,
        audit: Arc<AuditTrail>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            idea_repo,
            notifications,
            audit,
            clock,
        }
    }

    pub(super) async fn load_idea(&self, id: i64) -> ApplicationResult<Idea> {
        let id = IdeaId::new(id)?;
        self.idea_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("idea not found"))
    }
}

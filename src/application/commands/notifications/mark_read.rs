use super::NotificationCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, NotificationDto, RequestContext},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::audit::AuditAction,
};

impl NotificationCommandService {
    /// Flips a single notification to read. Only the owner may do so; anyone
    /// else is told it does not exist. Repeating the call is harmless.
    pub async fn mark_read(
        &self,
        actor: &AuthenticatedUser,
        notification_id: i64,
        ctx: &RequestContext,
    ) -> ApplicationResult<NotificationDto> {
        ensure_capability(actor, "notifications", "read")?;

        let notification = self
            .repo
            .mark_read(notification_id, actor.id, self.clock.now())
            .await?
            .ok_or_else(|| ApplicationError::not_found("notification not found"))?;

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::NotificationRead,
                    "notification",
                    format!("Marked notification {notification_id} as read"),
                )
                .resource_id(notification_id),
            )
            .await;

        Ok(notification.into())
    }
}

use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RequestContext},
        error::ApplicationResult,
        services::audit_trail::AuditTrail,
    },
    domain::audit::AuditAction,
};
use tracing::info;

impl UserCommandService {
    /// Revokes the session behind the presented token. Later requests carrying
    /// the same token are rejected.
    pub async fn logout(
        &self,
        actor: &AuthenticatedUser,
        ctx: &RequestContext,
    ) -> ApplicationResult<()> {
        if let Some(session_id) = &actor.session_id {
            self.session_revocation_store.revoke(session_id).await?;
        }
        info!(user_id = %actor.id, "user logged out");

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::Logout,
                    "user",
                    format!("{} logged out", actor.username),
                )
                .resource_id(actor.id.into()),
            )
            .await;
        Ok(())
    }
}

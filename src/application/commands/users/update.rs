use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, RequestContext, UserDto},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::AuditAction,
        user::{DisplayName, UserUpdate},
    },
};

pub struct UpdateProfileCommand {
    pub display_name: Option<String>,
}

impl UserCommandService {
    /// Updates the caller's own profile.
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProfileCommand,
        ctx: &RequestContext,
    ) -> ApplicationResult<UserDto> {
        let mut update = UserUpdate::new(actor.id);
        if let Some(display_name) = command.display_name {
            update = update.with_display_name(DisplayName::new(display_name)?);
        }
        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let user = self.user_repo.update(update).await?;

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::UserUpdate,
                    "user",
                    format!("{} updated their profile", actor.username),
                )
                .resource_id(actor.id.into()),
            )
            .await;

        Ok(user.into())
    }
}

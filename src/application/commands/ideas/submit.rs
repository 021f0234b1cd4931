use super::IdeaCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, IdeaDto, RequestContext},
        error::ApplicationResult,
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::AuditAction,
        idea::{IdeaCategory, IdeaDescription, IdeaTitle, NewIdea},
    },
};
use tracing::info;

pub struct SubmitIdeaCommand {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl IdeaCommandService {
    /// Files a new idea for the calling student. The idea belongs to the
    /// student's college and starts out `submitted`.
    pub async fn submit(
        &self,
        actor: &AuthenticatedUser,
        command: SubmitIdeaCommand,
        ctx: &RequestContext,
    ) -> ApplicationResult<IdeaDto> {
        ensure_capability(actor, "ideas", "submit")?;

        let new_idea = NewIdea {
            title: IdeaTitle::new(command.title)?,
            description: IdeaDescription::new(command.description)?,
            category: IdeaCategory::new(command.category)?,
            student_id: actor.id,
            college_id: actor.college_id,
            created_at: self.clock.now(),
        };
        let idea = self.idea_repo.insert(new_idea).await?;
        info!(idea_id = %idea.id, student_id = %actor.id, "idea submitted");

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::IdeaSubmit,
                    "idea",
                    format!("Submitted idea \"{}\"", idea.title),
                )
                .resource_id(idea.id.into())
                .meta("category", idea.category.as_str()),
            )
            .await;

        Ok(idea.into())
    }
}

use super::IdeaCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, IdeaDto, RequestContext},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::AuditAction,
        idea::{CanReviewIdeaSpec, IdeaTransition},
    },
};
use tracing::info;

impl IdeaCommandService {
    /// Moves a submitted idea into review. Calling it again for an idea that is
    /// already under review returns the idea unchanged.
    pub async fn start_review(
        &self,
        actor: &AuthenticatedUser,
        idea_id: i64,
        ctx: &RequestContext,
    ) -> ApplicationResult<IdeaDto> {
        let mut idea = self.load_idea(idea_id).await?;
        if !CanReviewIdeaSpec::new(actor.idea_actor(), &idea).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "idea belongs to another college",
            ));
        }

        let expected_version = idea.version;
        if !idea.start_review(self.clock.now())? {
            return Ok(idea.into());
        }

        let idea = self
            .idea_repo
            .transition(IdeaTransition::from_idea(&idea, expected_version))
            .await?;
        info!(idea_id = %idea.id, reviewer_id = %actor.id, "idea moved to review");

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::IdeaReviewStart,
                    "idea",
                    format!("Started review of idea \"{}\"", idea.title),
                )
                .resource_id(idea.id.into()),
            )
            .await;

        Ok(idea.into())
    }
}

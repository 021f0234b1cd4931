use super::IdeaQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, EvaluationDto, IdeaDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::idea::{CanViewIdeaSpec, Idea, IdeaId},
};

impl IdeaQueryService {
    pub async fn get_idea(
        &self,
        actor: &AuthenticatedUser,
        idea_id: i64,
    ) -> ApplicationResult<IdeaDto> {
        Ok(self.visible_idea(actor, idea_id).await?.into())
    }

    /// Evaluation history of an idea, oldest first.
    pub async fn list_evaluations(
        &self,
        actor: &AuthenticatedUser,
        idea_id: i64,
    ) -> ApplicationResult<Vec<EvaluationDto>> {
        let idea = self.visible_idea(actor, idea_id).await?;
        let evaluations = self.idea_repo.list_evaluations(idea.id).await?;
        Ok(evaluations.into_iter().map(EvaluationDto::from).collect())
    }

    async fn visible_idea(&self, actor: &AuthenticatedUser, idea_id: i64) -> ApplicationResult<Idea> {
        let idea = self
            .idea_repo
            .find_by_id(IdeaId::new(idea_id)?)
            .await?
            .ok_or_else(|| ApplicationError::not_found("idea not found"))?;

        if !CanViewIdeaSpec::new(actor.idea_actor(), &idea).is_satisfied() {
            return Err(ApplicationError::forbidden("not allowed to view this idea"));
        }
        Ok(idea)
    }
}

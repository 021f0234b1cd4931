use super::IdeaCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, EvaluationOutcomeDto, RequestContext},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::{
        audit::AuditAction,
        idea::{CanEvaluateIdeaSpec, Evaluation, Idea, NewEvaluation, Rating, Recommendation},
        notification::NotificationKind,
    },
};
use serde_json::json;
use tracing::{info, warn};

pub const EVALUATION_FIELDS_REQUIRED: &str = "please provide rating and recommendation";

pub struct EvaluateIdeaCommand {
    pub rating: Option<i64>,
    pub recommendation: Option<String>,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
}

impl EvaluateIdeaCommand {
    fn required_fields(&self) -> ApplicationResult<(Rating, Recommendation)> {
        let (Some(rating), Some(recommendation)) = (
            self.rating,
            self.recommendation.as_deref().map(str::trim).filter(|r| !r.is_empty()),
        ) else {
            return Err(ApplicationError::validation(EVALUATION_FIELDS_REQUIRED));
        };
        Ok((Rating::new(rating)?, recommendation.parse::<Recommendation>()?))
    }
}

impl IdeaCommandService {
    /// Records an evaluation and routes the idea to the recommended status.
    ///
    /// Rating and recommendation are checked before anything is read or
    /// written. The evaluation history row and the idea's current evaluation
    /// are persisted together. Two reviewers racing on the same idea are not
    /// detected; the later write becomes the idea's current evaluation.
    pub async fn evaluate(
        &self,
        actor: &AuthenticatedUser,
        idea_id: i64,
        command: EvaluateIdeaCommand,
        ctx: &RequestContext,
    ) -> ApplicationResult<EvaluationOutcomeDto> {
        let (rating, recommendation) = command.required_fields()?;

        let mut idea = self.load_idea(idea_id).await?;
        if !CanEvaluateIdeaSpec::new(actor.idea_actor(), &idea).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "idea belongs to another college",
            ));
        }

        let evaluation = NewEvaluation::new(
            idea.id,
            actor.id,
            rating,
            recommendation,
            command.comments,
            command.nurture_notes,
            self.clock.now(),
        );
        if evaluation.missing_nurture_notes() {
            warn!(idea_id = %idea.id, "nurture recommendation without nurture notes");
        }

        idea.apply_evaluation(&evaluation)?;
        let (idea, evaluation) = self.idea_repo.record_evaluation(evaluation).await?;
        info!(
            idea_id = %idea.id,
            evaluator_id = %actor.id,
            rating = rating.value(),
            recommendation = %recommendation,
            "idea evaluated"
        );

        self.notify_student(&idea, &evaluation).await;
        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::IdeaEvaluate,
                    "idea",
                    format!(
                        "Evaluated idea \"{}\": {} ({}/10)",
                        idea.title,
                        recommendation,
                        rating.value()
                    ),
                )
                .resource_id(idea.id.into())
                .meta("rating", rating.value())
                .meta("recommendation", recommendation.as_str()),
            )
            .await;

        Ok(EvaluationOutcomeDto {
            idea: idea.into(),
            evaluation: evaluation.into(),
        })
    }

    async fn notify_student(&self, idea: &Idea, evaluation: &Evaluation) {
        let (kind, title, message) = match evaluation.recommendation {
            Recommendation::Forward => (
                NotificationKind::Success,
                "Idea forwarded",
                format!("Your idea \"{}\" has been forwarded to the incubator.", idea.title),
            ),
            Recommendation::Nurture => (
                NotificationKind::Info,
                "Idea selected for nurturing",
                format!("Your idea \"{}\" will be nurtured before moving forward.", idea.title),
            ),
            Recommendation::Reject => (
                NotificationKind::Warning,
                "Idea not selected",
                format!("Your idea \"{}\" was not selected this time.", idea.title),
            ),
        };
        let data = json!({
            "idea_id": i64::from(idea.id),
            "rating": evaluation.rating.value(),
            "recommendation": evaluation.recommendation.as_str(),
        });

        if let Err(err) = self
            .notifications
            .notify(idea.student_id, kind, title, &message, data)
            .await
        {
            warn!(idea_id = %idea.id, error = %err, "failed to notify student of evaluation");
        }
    }
}

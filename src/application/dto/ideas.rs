use crate::domain::idea::{Evaluation, Idea, IdeaStatus, Recommendation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: IdeaStatus,
    pub student_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<i64>,
    pub rating: Option<u8>,
    pub recommendation: Option<Recommendation>,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
    pub evaluated_by: Option<i64>,
    #[serde(default, with = "serde_time::option")]
    pub evaluated_at: Option<DateTime<Utc>>,
    pub version: i32,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Idea> for IdeaDto {
    fn from(idea: Idea) -> Self {
        Self {
            id: idea.id.into(),
            title: idea.title.into_inner(),
            description: idea.description.into_inner(),
            category: idea.category.into_inner(),
            status: idea.status,
            student_id: idea.student_id.into(),
            college_id: idea.college_id,
            rating: idea.rating.map(|r| r.value()),
            recommendation: idea.recommendation,
            comments: idea.comments,
            nurture_notes: idea.nurture_notes,
            evaluated_by: idea.evaluated_by.map(Into::into),
            evaluated_at: idea.evaluated_at,
            version: idea.version,
            created_at: idea.created_at,
            updated_at: idea.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationDto {
    pub id: i64,
    pub idea_id: i64,
    pub evaluator_id: i64,
    pub rating: u8,
    pub recommendation: Recommendation,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationDto {
    fn from(e: Evaluation) -> Self {
        Self {
            id: e.id,
            idea_id: e.idea_id.into(),
            evaluator_id: e.evaluator_id.into(),
            rating: e.rating.value(),
            recommendation: e.recommendation,
            comments: e.comments,
            nurture_notes: e.nurture_notes,
            created_at: e.created_at,
        }
    }
}

/// Idea state after an evaluation together with the history row it produced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationOutcomeDto {
    pub idea: IdeaDto,
    pub evaluation: EvaluationDto,
}

// src/domain/idea/evaluation.rs
use crate::domain::idea::value_objects::{IdeaId, Rating, Recommendation};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// One persisted evaluation action. Ideas keep every evaluation they receive.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub id: i64,
    pub idea_id: IdeaId,
    pub evaluator_id: UserId,
    pub rating: Rating,
    pub recommendation: Recommendation,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub idea_id: IdeaId,
    pub evaluator_id: UserId,
    pub rating: Rating,
    pub recommendation: Recommendation,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewEvaluation {
    pub fn new(
        idea_id: IdeaId,
        evaluator_id: UserId,
        rating: Rating,
        recommendation: Recommendation,
        comments: Option<String>,
        nurture_notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            idea_id,
            evaluator_id,
            rating,
            recommendation,
            comments: non_blank(comments),
            nurture_notes: non_blank(nurture_notes),
            created_at,
        }
    }

    /// Nurture recommendations are expected to carry notes; this is advisory only.
    pub fn missing_nurture_notes(&self) -> bool {
        self.recommendation == Recommendation::Nurture && self.nurture_notes.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

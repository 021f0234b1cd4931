// src/domain/idea/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::idea::evaluation::NewEvaluation;
use crate::domain::idea::value_objects::{
    IdeaCategory, IdeaDescription, IdeaId, IdeaStatus, IdeaTitle, Rating, Recommendation,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Idea {
    pub id: IdeaId,
    pub title: IdeaTitle,
    pub description: IdeaDescription,
    pub category: IdeaCategory,
    pub status: IdeaStatus,
    pub student_id: UserId,
    pub college_id: Option<i64>,
    pub rating: Option<Rating>,
    pub recommendation: Option<Recommendation>,
    pub comments: Option<String>,
    pub nurture_notes: Option<String>,
    pub evaluated_by: Option<UserId>,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Moves a fresh submission into review. Returns `false` when the idea is
    /// already under review.
    pub fn start_review(&mut self, now: DateTime<Utc>) -> DomainResult<bool> {
        match self.status {
            IdeaStatus::Submitted => {
                self.status = IdeaStatus::UnderReview;
                self.touch(now);
                Ok(true)
            }
            IdeaStatus::UnderReview => Ok(false),
            other => Err(DomainError::Conflict(format!(
                "idea in status {other} cannot be moved to review"
            ))),
        }
    }

    /// Overwrites the current evaluation and routes the idea to the
    /// recommended status. Only ideas awaiting evaluation qualify.
    pub fn apply_evaluation(&mut self, evaluation: &NewEvaluation) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "idea has already been decided ({})",
                self.status
            )));
        }
        if !self.status.is_evaluable() {
            return Err(DomainError::Conflict(format!(
                "idea in status {} cannot be evaluated",
                self.status
            )));
        }

        self.status = evaluation.recommendation.target_status();
        self.rating = Some(evaluation.rating);
        self.recommendation = Some(evaluation.recommendation);
        self.comments = evaluation.comments.clone();
        self.nurture_notes = evaluation.nurture_notes.clone();
        self.evaluated_by = Some(evaluation.evaluator_id);
        self.evaluated_at = Some(evaluation.created_at);
        self.touch(evaluation.created_at);
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}

#[derive(Debug, Clone)]
pub struct NewIdea {
    pub title: IdeaTitle,
    pub description: IdeaDescription,
    pub category: IdeaCategory,
    pub student_id: UserId,
    pub college_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Status change guarded by the version the caller read.
#[derive(Debug, Clone)]
pub struct IdeaTransition {
    pub id: IdeaId,
    pub status: IdeaStatus,
    pub expected_version: i32,
    pub updated_at: DateTime<Utc>,
}

impl IdeaTransition {
    pub fn from_idea(idea: &Idea, expected_version: i32) -> Self {
        Self {
            id: idea.id,
            status: idea.status,
            expected_version,
            updated_at: idea.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdeaListFilter {
    pub statuses: Vec<IdeaStatus>,
    pub college_id: Option<i64>,
    pub student_id: Option<UserId>,
    pub category: Option<String>,
}

impl IdeaListFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&idea.status))
            && self
                .college_id
                .is_none_or(|college| idea.college_id == Some(college))
            && self.student_id.is_none_or(|student| idea.student_id == student)
            && self
                .category
                .as_deref()
                .is_none_or(|category| idea.category.as_str() == category)
    }
}

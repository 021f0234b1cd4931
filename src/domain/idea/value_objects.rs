// src/domain/idea/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdeaId(pub i64);

impl IdeaId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("idea id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<IdeaId> for i64 {
    fn from(value: IdeaId) -> Self {
        value.0
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaTitle(String);

impl IdeaTitle {
    const MAX_LEN: usize = 200;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("title cannot be empty".into()));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "title must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for IdeaTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDescription(String);

impl IdeaDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("description cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaCategory(String);

impl IdeaCategory {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_lowercase();
        if value.is_empty() {
            return Err(DomainError::Validation("category cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Position of an idea in the review pipeline.
///
/// `submitted → under_review`, and any of `submitted | under_review | nurture`
/// may be evaluated into `nurture | forward | reject`. `forward` and `reject`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    #[serde(alias = "new_submission")]
    Submitted,
    UnderReview,
    Nurture,
    Forward,
    Reject,
}

impl IdeaStatus {
    pub const AWAITING_EVALUATION: [IdeaStatus; 2] = [IdeaStatus::Submitted, IdeaStatus::UnderReview];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaStatus::Submitted => "submitted",
            IdeaStatus::UnderReview => "under_review",
            IdeaStatus::Nurture => "nurture",
            IdeaStatus::Forward => "forward",
            IdeaStatus::Reject => "reject",
        }
    }

    pub fn is_awaiting_evaluation(&self) -> bool {
        Self::AWAITING_EVALUATION.contains(self)
    }

    /// Evaluation is accepted only from `submitted` or `under_review`;
    /// nurture is not a re-entry point.
    pub fn is_evaluable(&self) -> bool {
        matches!(self, IdeaStatus::Submitted | IdeaStatus::UnderReview)
    }

    /// Forward and reject close the idea for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IdeaStatus::Forward | IdeaStatus::Reject)
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" | "new_submission" => Ok(IdeaStatus::Submitted),
            "under_review" => Ok(IdeaStatus::UnderReview),
            "nurture" => Ok(IdeaStatus::Nurture),
            "forward" => Ok(IdeaStatus::Forward),
            "reject" => Ok(IdeaStatus::Reject),
            other => Err(DomainError::Validation(format!(
                "unknown idea status '{other}'"
            ))),
        }
    }
}

/// Evaluator's routing decision for an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Nurture,
    Forward,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Nurture => "nurture",
            Recommendation::Forward => "forward",
            Recommendation::Reject => "reject",
        }
    }

    pub fn target_status(&self) -> IdeaStatus {
        match self {
            Recommendation::Nurture => IdeaStatus::Nurture,
            Recommendation::Forward => IdeaStatus::Forward,
            Recommendation::Reject => IdeaStatus::Reject,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nurture" => Ok(Recommendation::Nurture),
            "forward" => Ok(Recommendation::Forward),
            "reject" => Ok(Recommendation::Reject),
            other => Err(DomainError::Validation(format!(
                "recommendation must be one of nurture, forward, reject (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new(value: i64) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::Validation(format!(
                "rating must be an integer between {} and {}",
                Self::MIN,
                Self::MAX
            )));
        }
        // in range, so the narrowing cannot truncate
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        i16::from(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_new_submission_reads_as_submitted() {
        assert_eq!(
            "new_submission".parse::<IdeaStatus>().unwrap(),
            IdeaStatus::Submitted
        );
        let parsed: IdeaStatus = serde_json::from_str("\"new_submission\"").unwrap();
        assert_eq!(parsed, IdeaStatus::Submitted);
        assert_eq!(IdeaStatus::Submitted.as_str(), "submitted");
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(10).unwrap().value(), 10);
        assert!(Rating::new(11).is_err());
    }

    #[test]
    fn recommendation_maps_onto_matching_status() {
        assert_eq!(Recommendation::Nurture.target_status(), IdeaStatus::Nurture);
        assert_eq!(Recommendation::Forward.target_status(), IdeaStatus::Forward);
        assert_eq!(Recommendation::Reject.target_status(), IdeaStatus::Reject);
        assert!("approve".parse::<Recommendation>().is_err());
    }

    #[test]
    fn only_submitted_and_under_review_are_evaluable() {
        assert!(IdeaStatus::Submitted.is_evaluable());
        assert!(IdeaStatus::UnderReview.is_evaluable());
        assert!(!IdeaStatus::Nurture.is_evaluable());
        assert!(!IdeaStatus::Nurture.is_terminal());
        assert!(!IdeaStatus::Forward.is_evaluable());
        assert!(!IdeaStatus::Reject.is_evaluable());
        assert!(IdeaStatus::Reject.is_terminal());
    }
}

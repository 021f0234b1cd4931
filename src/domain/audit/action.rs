// src/domain/audit/action.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

macro_rules! audit_actions {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Closed vocabulary of audited user actions.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum AuditAction {
            $($variant),+
        }

        impl AuditAction {
            pub const ALL: &'static [AuditAction] = &[$(AuditAction::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(AuditAction::$variant => $name),+
                }
            }
        }

        impl FromStr for AuditAction {
            type Err = DomainError;

            fn from_str(s: &str) -> DomainResult<Self> {
                match s {
                    $($name => Ok(AuditAction::$variant),)+
                    other => Err(DomainError::Validation(format!("unknown audit action '{other}'"))),
                }
            }
        }
    };
}

audit_actions! {
    Login => "LOGIN",
    LoginFailed => "LOGIN_FAILED",
    Logout => "LOGOUT",
    UserCreate => "USER_CREATE",
    UserUpdate => "USER_UPDATE",
    UserDelete => "USER_DELETE",
    IdeaSubmit => "IDEA_SUBMIT",
    IdeaUpdate => "IDEA_UPDATE",
    IdeaReviewStart => "IDEA_REVIEW_START",
    IdeaEvaluate => "IDEA_EVALUATE",
    IdeaDelete => "IDEA_DELETE",
    EventCreate => "EVENT_CREATE",
    EventUpdate => "EVENT_UPDATE",
    EventDelete => "EVENT_DELETE",
    DocumentUpload => "DOCUMENT_UPLOAD",
    DocumentDelete => "DOCUMENT_DELETE",
    MentorAssign => "MENTOR_ASSIGN",
    CollegeUpdate => "COLLEGE_UPDATE",
    IncubatorUpdate => "INCUBATOR_UPDATE",
    NotificationRead => "NOTIFICATION_READ",
    AuditExport => "AUDIT_EXPORT",
    SettingsUpdate => "SETTINGS_UPDATE",
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    #[default]
    Success,
    Failed,
    Warning,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Success => "SUCCESS",
            AuditStatus::Failed => "FAILED",
            AuditStatus::Warning => "WARNING",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "SUCCESS" => Ok(AuditStatus::Success),
            "FAILED" => Ok(AuditStatus::Failed),
            "WARNING" => Ok(AuditStatus::Warning),
            other => Err(DomainError::Validation(format!(
                "unknown audit status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for action in AuditAction::ALL {
            let json = serde_json::to_string(action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
            assert_eq!(action.as_str().parse::<AuditAction>().unwrap(), *action);
        }
    }

    #[test]
    fn status_parses_upper_case_only() {
        assert_eq!("FAILED".parse::<AuditStatus>().unwrap(), AuditStatus::Failed);
        assert!("failed".parse::<AuditStatus>().is_err());
    }
}

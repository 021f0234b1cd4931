// src/domain/notification/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            other => Err(DomainError::Validation(format!(
                "unknown notification kind '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: i64,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Marks the notification read. Returns `false` when it already was, in
    /// which case the original `read_at` is kept.
    pub fn mark_read(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(now);
        true
    }
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    pub fn new(
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        data: Value,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation(
                "notification title cannot be empty".into(),
            ));
        }
        Ok(Self {
            user_id,
            kind,
            title,
            message: message.into(),
            data,
            created_at,
        })
    }
}

// src/domain/audit/entity.rs
use crate::domain::audit::action::{AuditAction, AuditStatus};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub const ANONYMOUS_USER_NAME: &str = "anonymous";

/// Immutable record of something a user did.
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: Option<i64>,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub status: AuditStatus,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLogEntry {
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: Option<i64>,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub status: AuditStatus,
    pub metadata: Value,
    /// Stamped by the recorder when left empty.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewAuditLogEntry {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id: None,
            user_name: ANONYMOUS_USER_NAME.to_string(),
            action,
            resource_type: resource_type.into(),
            resource_id: None,
            description: description.into(),
            ip_address: None,
            user_agent: None,
            status: AuditStatus::Success,
            metadata: Value::Object(Map::new()),
            created_at: None,
        }
    }

    pub fn by_user(mut self, user_id: UserId, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id);
        self.user_name = user_name.into();
        self
    }

    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    pub fn resource_id(mut self, resource_id: i64) -> Self {
        self.resource_id = Some(resource_id);
        self
    }

    pub fn status(mut self, status: AuditStatus) -> Self {
        self.status = status;
        self
    }

    pub fn client(mut self, ip_address: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }

    /// Adds one key to the metadata object.
    pub fn meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.metadata {
            map.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

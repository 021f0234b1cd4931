use crate::domain::audit::{AuditAction, AuditLogEntry, AuditStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub user_name: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: Option<i64>,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub status: AuditStatus,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<AuditLogEntry> for AuditLogDto {
    fn from(a: AuditLogEntry) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id.map(Into::into),
            user_name: a.user_name,
            action: a.action,
            resource_type: a.resource_type,
            resource_id: a.resource_id,
            description: a.description,
            ip_address: a.ip_address,
            user_agent: a.user_agent,
            status: a.status,
            metadata: a.metadata,
            created_at: a.created_at,
        }
    }
}

/// Rendered CSV document ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub row_count: usize,
    pub body: String,
}

// src/infrastructure/repositories/postgres_audit_log.rs
use super::{like_pattern, map_sqlx, push_condition};
use crate::domain::audit::{
    AuditLogEntry, AuditLogFilter, AuditLogRepository, NewAuditLogEntry,
};
use crate::domain::cursor::{PageCursor, split_page};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const AUDIT_COLUMNS: &str = "id, user_id, user_name, action, resource_type, resource_id, \
     description, ip_address, user_agent, status, metadata, created_at";

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &AuditLogFilter, cursor: Option<PageCursor>) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {AUDIT_COLUMNS} FROM audit_logs"));
        let mut has_where = false;

        if let Some(term) = filter.search_term() {
            let pattern = like_pattern(&term);
            push_condition(&mut builder, &mut has_where);
            builder.push("(user_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR action ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR resource_type ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if let Some(action) = filter.action {
            push_condition(&mut builder, &mut has_where);
            builder.push("action = ");
            builder.push_bind(action.as_str());
        }

        if let Some(user_id) = filter.user_id {
            push_condition(&mut builder, &mut has_where);
            builder.push("user_id = ");
            builder.push_bind(i64::from(user_id));
        }

        if let Some(lower) = filter.lower_bound() {
            push_condition(&mut builder, &mut has_where);
            builder.push("created_at >= ");
            builder.push_bind(lower);
        }

        if let Some(upper) = filter.upper_bound_exclusive() {
            push_condition(&mut builder, &mut has_where);
            builder.push("created_at < ");
            builder.push_bind(upper);
        }

        if let Some(cursor) = cursor {
            push_condition(&mut builder, &mut has_where);
            builder.push("(created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder
    }

    async fn fetch(&self, mut builder: QueryBuilder<'static, Postgres>) -> DomainResult<Vec<AuditLogEntry>> {
        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter()
            .map(AuditLogEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    user_id: Option<i64>,
    user_name: String,
    action: String,
    resource_type: String,
    resource_id: Option<i64>,
    description: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    status: String,
    metadata: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(AuditLogEntry {
            id: row.id,
            user_id: row.user_id.map(UserId::new).transpose()?,
            user_name: row.user_name,
            action: row.action.parse()?,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            description: row.description,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            status: row.status.parse()?,
            metadata: row.metadata,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, entry: NewAuditLogEntry) -> DomainResult<AuditLogEntry> {
        let row = sqlx::query_as::<_, AuditLogRow>(&format!(
            "INSERT INTO audit_logs (user_id, user_name, action, resource_type, resource_id,
                 description, ip_address, user_agent, status, metadata, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, NOW()))
             RETURNING {AUDIT_COLUMNS}"
        ))
        .bind(entry.user_id.map(i64::from))
        .bind(&entry.user_name)
        .bind(entry.action.as_str())
        .bind(&entry.resource_type)
        .bind(entry.resource_id)
        .bind(&entry.description)
        .bind(entry.ip_address.as_deref())
        .bind(entry.user_agent.as_deref())
        .bind(entry.status.as_str())
        .bind(&entry.metadata)
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        AuditLogEntry::try_from(row)
    }

    async fn list(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<AuditLogEntry>, Option<PageCursor>)> {
        let limit = limit.clamp(1, 100);
        let mut builder = Self::select(filter, cursor);
        builder.push_bind(i64::from(limit) + 1);
        let entries = self.fetch(builder).await?;

        Ok(split_page(entries, limit, |entry| {
            PageCursor::new(entry.created_at, entry.id)
        }))
    }

    async fn export(
        &self,
        filter: &AuditLogFilter,
        max_rows: u32,
    ) -> DomainResult<Vec<AuditLogEntry>> {
        let mut builder = Self::select(filter, None);
        builder.push_bind(i64::from(max_rows));
        self.fetch(builder).await
    }
}

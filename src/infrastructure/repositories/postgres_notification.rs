// src/infrastructure/repositories/postgres_notification.rs
use super::{map_sqlx, push_condition};
use crate::domain::cursor::{PageCursor, split_page};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::notification::{NewNotification, Notification, NotificationRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, kind, title, message, data, is_read, created_at, read_at";

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: i64,
    user_id: i64,
    kind: String,
    title: String,
    message: String,
    data: Value,
    is_read: bool,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: row.id,
            user_id: UserId::new(row.user_id)?,
            kind: row.kind.parse()?,
            title: row.title,
            message: row.message,
            data: row.data,
            is_read: row.is_read,
            created_at: row.created_at,
            read_at: row.read_at,
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(&self, notification: NewNotification) -> DomainResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "INSERT INTO notifications (user_id, kind, title, message, data, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(i64::from(notification.user_id))
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Notification::try_from(row)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Notification>, Option<PageCursor>)> {
        let limit = limit.clamp(1, 100);
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications"));
        let mut has_where = false;

        push_condition(&mut builder, &mut has_where);
        builder.push("user_id = ");
        builder.push_bind(i64::from(user_id));

        if unread_only {
            push_condition(&mut builder, &mut has_where);
            builder.push("is_read = FALSE");
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
        builder.push_bind(i64::from(limit) + 1);

        let rows = builder
            .build_query_as::<NotificationRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let notifications = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(split_page(notifications, limit, |n| {
            PageCursor::new(n.created_at, n.id)
        }))
    }

    async fn count_unread(&self, user_id: UserId) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(i64::from(user_id))
        .fetch_one(&self.pool)
        .await
        .map(|count| count.max(0) as u64)
        .map_err(map_sqlx)
    }

    async fn mark_read(
        &self,
        id: i64,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Notification>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE id = $1 AND user_id = $2
             FOR UPDATE"
        ))
        .bind(id)
        .bind(i64::from(user_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(map_sqlx)?;
            return Ok(None);
        };
        let mut notification = Notification::try_from(row)?;

        // Already read: keep the first read time and write nothing.
        if notification.mark_read(now) {
            sqlx::query("UPDATE notifications SET is_read = TRUE, read_at = $2 WHERE id = $1")
                .bind(notification.id)
                .bind(notification.read_at)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        Ok(Some(notification))
    }
}

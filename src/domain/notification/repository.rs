use crate::domain::cursor::PageCursor;
use crate::domain::errors::DomainResult;
use crate::domain::notification::entity::{NewNotification, Notification};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: NewNotification) -> DomainResult<Notification>;

    /// Newest first, scoped to the owner.
    async fn list_for_user(
        &self,
        user_id: UserId,
        unread_only: bool,
        limit: u32,
        cursor: Option<PageCursor>,
    ) -> DomainResult<(Vec<Notification>, Option<PageCursor>)>;

    async fn count_unread(&self, user_id: UserId) -> DomainResult<u64>;

    /// Returns `None` when no notification with `id` belongs to `user_id`.
    /// Already-read notifications are returned unchanged.
    async fn mark_read(
        &self,
        id: i64,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Notification>>;
}

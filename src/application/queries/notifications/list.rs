use super::NotificationQueryService;
use crate::application::{
    capability::ensure_capability,
    dto::{
        AuthenticatedUser, CursorPage, NotificationDto, UnreadCountDto,
        pagination::normalize_limit,
    },
    error::ApplicationResult,
    queries::decode_cursor,
};

pub struct ListNotificationsQuery {
    pub unread_only: bool,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl NotificationQueryService {
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        query: ListNotificationsQuery,
    ) -> ApplicationResult<CursorPage<NotificationDto>> {
        ensure_capability(actor, "notifications", "read")?;
        let cursor = decode_cursor(query.cursor.as_deref())?;
        let (items, next) = self
            .repo
            .list_for_user(actor.id, query.unread_only, normalize_limit(query.limit), cursor)
            .await?;
        Ok(CursorPage::from_domain(items, next))
    }

    pub async fn unread_count(&self, actor: &AuthenticatedUser) -> ApplicationResult<UnreadCountDto> {
        ensure_capability(actor, "notifications", "read")?;
        let count = self.repo.count_unread(actor.id).await?;
        Ok(UnreadCountDto { count })
    }
}

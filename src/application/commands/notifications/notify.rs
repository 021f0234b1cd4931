use super::NotificationCommandService;
use crate::{
    application::{dto::NotificationDto, error::ApplicationResult},
    domain::{
        notification::{NewNotification, NotificationKind},
        user::UserId,
    },
};
use serde_json::Value;
use tracing::debug;

impl NotificationCommandService {
    /// Delivers a notification to `user_id`'s inbox.
    pub async fn notify(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        title: &str,
        message: &str,
        data: Value,
    ) -> ApplicationResult<NotificationDto> {
        let notification =
            NewNotification::new(user_id, kind, title, message, data, self.clock.now())?;
        let stored = self.repo.insert(notification).await?;
        debug!(notification_id = stored.id, %user_id, kind = kind.as_str(), "notification delivered");
        Ok(stored.into())
    }
}

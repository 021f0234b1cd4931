use std::sync::Arc;

use crate::domain::notification::NotificationRepository;

pub struct NotificationQueryService {
    pub(super) repo: Arc<dyn NotificationRepository>,
}

impl NotificationQueryService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }
}

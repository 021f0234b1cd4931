mod list;
mod service;

pub use list::ListNotificationsQuery;
pub use service::NotificationQueryService;

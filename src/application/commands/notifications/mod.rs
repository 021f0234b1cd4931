mod mark_read;
mod notify;
mod service;

pub use service::NotificationCommandService;

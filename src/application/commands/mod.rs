pub mod ideas;
pub mod notifications;
pub mod users;

// tests/support/mocks/mod.rs
pub mod repos;
pub mod security;
pub mod time;

pub use repos::{
    InMemoryAuditRepo, InMemoryIdeaRepo, InMemoryNotificationRepo, InMemoryUserRepo,
    SEEDED_PASSWORD,
};
pub use security::*;
pub use time::{FixedClock, fixed_now};

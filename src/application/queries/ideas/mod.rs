mod get;
mod list;
mod service;

pub use list::{ListIdeasForReviewQuery, ListMyIdeasQuery};
pub use service::IdeaQueryService;

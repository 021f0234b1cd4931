pub mod action;
pub mod entity;
pub mod filter;
pub mod repository;

pub use action::{AuditAction, AuditStatus};
pub use entity::{AuditLogEntry, NewAuditLogEntry};
pub use filter::AuditLogFilter;
pub use repository::AuditLogRepository;

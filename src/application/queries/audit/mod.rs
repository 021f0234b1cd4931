mod common;
mod export;
mod list;
mod service;

pub use common::AuditLogCriteria;
pub use export::{CSV_HEADER, ExportAuditLogsQuery, MAX_EXPORT_ROWS};
pub use list::ListAuditLogsQuery;
pub use service::AuditQueryService;

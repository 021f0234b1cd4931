// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_idea;
mod postgres_notification;
mod postgres_user;

pub use error::{like_pattern, map_sqlx};
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_idea::PostgresIdeaRepository;
pub use postgres_notification::PostgresNotificationRepository;
pub use postgres_user::PostgresUserRepository;

use sqlx::{Postgres, QueryBuilder};

/// Pushes ` WHERE ` before the first condition and ` AND ` before the rest.
pub(crate) fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

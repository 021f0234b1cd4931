use crate::{
    application::error::ApplicationResult,
    domain::{
        audit::{AuditAction, AuditLogFilter},
        user::UserId,
    },
};
use chrono::NaiveDate;

/// Raw filter input shared by the list and export queries.
#[derive(Debug, Clone, Default)]
pub struct AuditLogCriteria {
    pub search: Option<String>,
    pub action: Option<String>,
    pub user_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AuditLogCriteria {
    pub(super) fn into_filter(self) -> ApplicationResult<AuditLogFilter> {
        let action = self
            .action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::parse::<AuditAction>)
            .transpose()?;
        let user_id = self.user_id.map(UserId::new).transpose()?;

        let filter = AuditLogFilter {
            search: self.search,
            action,
            user_id,
            start_date: self.start_date,
            end_date: self.end_date,
        };
        filter.validate()?;
        Ok(filter)
    }
}

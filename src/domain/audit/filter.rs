// src/domain/audit/filter.rs
use crate::domain::audit::action::AuditAction;
use crate::domain::audit::entity::AuditLogEntry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Criteria for narrowing the audit trail. Every criterion is optional and an
/// empty filter selects everything. Dates are calendar days in UTC and both
/// ends are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub search: Option<String>,
    pub action: Option<AuditAction>,
    pub user_id: Option<UserId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AuditLogFilter {
    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DomainError::Validation(
                    "start_date must not be after end_date".into(),
                ));
            }
        }
        Ok(())
    }

    /// Trimmed, lower-cased search term; `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// First instant included by `start_date`.
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.start_date.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// First instant excluded by `end_date`, i.e. midnight of the next day.
    pub fn upper_bound_exclusive(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .and_then(|d| d.succ_opt())
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if self.action.is_some_and(|action| entry.action != action) {
            return false;
        }
        if self.user_id.is_some_and(|user| entry.user_id != Some(user)) {
            return false;
        }
        if self.lower_bound().is_some_and(|lower| entry.created_at < lower) {
            return false;
        }
        if self
            .upper_bound_exclusive()
            .is_some_and(|upper| entry.created_at >= upper)
        {
            return false;
        }
        match self.search_term() {
            Some(term) => [
                entry.user_name.as_str(),
                entry.action.as_str(),
                entry.resource_type.as_str(),
                entry.description.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }
}

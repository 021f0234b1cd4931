use super::{AuditLogCriteria, AuditQueryService};
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, CsvExport, RequestContext},
        error::{ApplicationError, ApplicationResult},
        services::audit_trail::AuditTrail,
    },
    domain::audit::{AuditAction, AuditLogEntry},
};
use chrono::SecondsFormat;
use tracing::{info, warn};

pub const CSV_HEADER: [&str; 8] = [
    "Timestamp",
    "User",
    "Action",
    "Resource Type",
    "Resource ID",
    "Description",
    "IP Address",
    "Status",
];

pub const MAX_EXPORT_ROWS: u32 = 10_000;

pub struct ExportAuditLogsQuery {
    pub criteria: AuditLogCriteria,
}

impl AuditQueryService {
    /// Renders every entry matching the criteria (not just one page) as CSV.
    /// Filters matching more than [`MAX_EXPORT_ROWS`] entries are rejected
    /// rather than cut short.
    pub async fn export_audit_logs(
        &self,
        actor: &AuthenticatedUser,
        query: ExportAuditLogsQuery,
        ctx: &RequestContext,
    ) -> ApplicationResult<CsvExport> {
        ensure_capability(actor, "audit", "export")?;
        let filter = query.criteria.into_filter()?;

        let entries = self.repo.export(&filter, MAX_EXPORT_ROWS + 1).await?;
        if entries.len() > MAX_EXPORT_ROWS as usize {
            warn!(
                user_id = %actor.id,
                max_rows = MAX_EXPORT_ROWS,
                "audit export over the row cap"
            );
            return Err(ApplicationError::validation(format!(
                "export matches more than {MAX_EXPORT_ROWS} entries; narrow the filter and try again"
            )));
        }
        let body = render_csv(&entries)?;
        let now = self.clock.now();
        let filename = format!("audit-logs-{}.csv", now.format("%Y%m%d-%H%M%S"));
        info!(rows = entries.len(), user_id = %actor.id, "audit log exported");

        self.audit
            .record(
                AuditTrail::entry(
                    actor,
                    ctx,
                    AuditAction::AuditExport,
                    "audit_log",
                    format!("Exported {} audit log entries", entries.len()),
                )
                .meta("row_count", entries.len()),
            )
            .await;

        Ok(CsvExport {
            filename,
            row_count: entries.len(),
            body,
        })
    }
}

pub(super) fn render_csv(entries: &[AuditLogEntry]) -> ApplicationResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        let timestamp = entry.created_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let resource_id = entry
            .resource_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        writer.write_record([
            timestamp.as_str(),
            entry.user_name.as_str(),
            entry.action.as_str(),
            entry.resource_type.as_str(),
            resource_id.as_str(),
            entry.description.as_str(),
            entry.ip_address.as_deref().unwrap_or_default(),
            entry.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ApplicationError::infrastructure(format!("csv: {err}")))?;
    String::from_utf8(bytes).map_err(|err| ApplicationError::infrastructure(format!("csv: {err}")))
}

// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::{AuditLogDto, CursorPage},
    error::ApplicationError,
    queries::audit::{AuditLogCriteria, ExportAuditLogsQuery, ListAuditLogsQuery},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiQuery, Authenticated, ClientContext};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

/// Filters shared by the viewer and the export. Blank values mean "any".
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditFilterParams {
    /// Case-insensitive substring of user name, action, resource type or description.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact action code, e.g. `LOGIN`.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Inclusive, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive through 23:59:59, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditPageParams {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl AuditFilterParams {
    fn into_criteria(self) -> HttpResult<AuditLogCriteria> {
        Ok(AuditLogCriteria {
            search: self.search.filter(|s| !s.trim().is_empty()),
            action: self.action,
            user_id: self.user_id,
            start_date: parse_date("start_date", self.start_date.as_deref())?,
            end_date: parse_date("end_date", self.end_date.as_deref())?,
        })
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> HttpResult<Option<NaiveDate>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            HttpError::from_error(ApplicationError::validation(format!(
                "{field} must be a date in YYYY-MM-DD format"
            )))
        })
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/audit-logs",
    params(AuditFilterParams, AuditPageParams),
    responses(
        (status = 200, description = "Audit entries, newest first.", body = ApiResponse<CursorPage<AuditLogDto>>),
        (status = 400, description = "Invalid filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(filter): ApiQuery<AuditFilterParams>,
    ApiQuery(page): ApiQuery<AuditPageParams>,
) -> HttpResult<ApiResponse<CursorPage<AuditLogDto>>> {
    let query = ListAuditLogsQuery {
        criteria: filter.into_criteria()?,
        limit: page.limit,
        cursor: page.cursor,
    };

    state
        .services
        .audit_queries
        .list_audit_logs(&user, query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/audit-logs/export",
    params(AuditFilterParams),
    responses(
        (status = 200, description = "CSV attachment of every matching entry.", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn export_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiQuery(filter): ApiQuery<AuditFilterParams>,
) -> HttpResult<Response> {
    let query = ExportAuditLogsQuery {
        criteria: filter.into_criteria()?,
    };

    let export = state
        .services
        .audit_queries
        .export_audit_logs(&user, query, &ctx)
        .await
        .into_http()?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename
    ))
    .map_err(|err| {
        HttpError::from_error(ApplicationError::infrastructure(format!(
            "invalid content-disposition: {err}"
        )))
    })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response())
}

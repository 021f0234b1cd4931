// src/presentation/http/controllers/notifications.rs
use crate::application::{
    dto::{CursorPage, NotificationDto, UnreadCountDto},
    queries::notifications::ListNotificationsQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiPath, ApiQuery, Authenticated, ClientContext};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListParams {
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(NotificationListParams),
    responses(
        (status = 200, description = "The caller's notifications, newest first.", body = ApiResponse<CursorPage<NotificationDto>>),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Notifications"
)]
pub async fn list_notifications(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<NotificationListParams>,
) -> HttpResult<ApiResponse<CursorPage<NotificationDto>>> {
    let query = ListNotificationsQuery {
        unread_only: params.unread_only,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .notification_queries
        .list(&user, query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Number of unread notifications.", body = ApiResponse<UnreadCountDto>),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Notifications"
)]
pub async fn unread_count(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<UnreadCountDto>> {
    state
        .services
        .notification_queries
        .unread_count(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

/// Also mounted under `/api/v1/college-coordinator/notifications/{id}/read`.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked as read.", body = ApiResponse<NotificationDto>),
        (status = 404, description = "No such notification for the caller.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Notifications"
)]
pub async fn mark_as_read(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<ApiResponse<NotificationDto>> {
    state
        .services
        .notification_commands
        .mark_read(&user, id, &ctx)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, ideas, notifications},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi::serve_openapi))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route(
            "/api/v1/auth/me",
            get(auth::profile).patch(auth::update_user),
        )
        .route(
            "/api/v1/student/ideas",
            get(ideas::list_my_ideas).post(ideas::submit_idea),
        )
        .route("/api/v1/ideas/{id}", get(ideas::get_idea))
        .route(
            "/api/v1/ideas/{id}/evaluations",
            get(ideas::list_evaluations),
        )
        .route(
            "/api/v1/college-coordinator/ideas",
            get(ideas::list_ideas_for_review),
        )
        .route(
            "/api/v1/college-coordinator/ideas/{id}/review",
            post(ideas::start_review),
        )
        .route(
            "/api/v1/college-coordinator/ideas/{id}/evaluate",
            post(ideas::evaluate_idea),
        )
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            put(notifications::mark_as_read),
        )
        .route(
            "/api/v1/college-coordinator/notifications/{id}/read",
            put(notifications::mark_as_read),
        )
        .route("/api/v1/admin/audit-logs", get(audit::list_audit_logs))
        .route(
            "/api/v1/admin/audit-logs/export",
            get(audit::export_audit_logs),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System",
    security(())
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}

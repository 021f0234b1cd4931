// src/presentation/http/openapi.rs
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};

/// Default location of the committed OpenAPI snapshot.
pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::logout,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::auth::update_user,
        crate::presentation::http::controllers::ideas::submit_idea,
        crate::presentation::http::controllers::ideas::list_my_ideas,
        crate::presentation::http::controllers::ideas::get_idea,
        crate::presentation::http::controllers::ideas::list_evaluations,
        crate::presentation::http::controllers::ideas::list_ideas_for_review,
        crate::presentation::http::controllers::ideas::start_review,
        crate::presentation::http::controllers::ideas::evaluate_idea,
        crate::presentation::http::controllers::notifications::list_notifications,
        crate::presentation::http::controllers::notifications::unread_count,
        crate::presentation::http::controllers::notifications::mark_as_read,
        crate::presentation::http::controllers::audit::list_audit_logs,
        crate::presentation::http::controllers::audit::export_audit_logs
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::auth::LogoutResponse,
            crate::presentation::http::controllers::auth::UpdateProfileRequest,
            crate::presentation::http::controllers::ideas::SubmitIdeaRequest,
            crate::presentation::http::controllers::ideas::EvaluateIdeaRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::IdeaDto,
            crate::application::dto::EvaluationDto,
            crate::application::dto::EvaluationOutcomeDto,
            crate::application::dto::NotificationDto,
            crate::application::dto::UnreadCountDto,
            crate::application::dto::AuditLogDto,
            crate::domain::idea::IdeaStatus,
            crate::domain::idea::Recommendation,
            crate::domain::audit::AuditAction,
            crate::domain::audit::AuditStatus,
            crate::domain::notification::NotificationKind,
            crate::domain::user::Role
        )
    ),
    tags(
        (name = "Auth", description = "Authentication and profile endpoints"),
        (name = "Ideas", description = "Idea submission and lookup"),
        (name = "Review", description = "Coordinator review and evaluation workflow"),
        (name = "Notifications", description = "In-app notifications"),
        (name = "Audit", description = "Audit trail viewer and CSV export"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Ideaflow API",
        description = "Innovation portal backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn write_openapi_snapshot(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &ApiDoc::openapi())?;
    Ok(())
}

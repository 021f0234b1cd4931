// src/presentation/http/controllers/ideas.rs
use crate::application::{
    commands::ideas::{EvaluateIdeaCommand, SubmitIdeaCommand},
    dto::{CursorPage, EvaluationDto, EvaluationOutcomeDto, IdeaDto},
    queries::ideas::{ListIdeasForReviewQuery, ListMyIdeasQuery},
};
use crate::domain::idea::IdeaStatus;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiJson, ApiPath, ApiQuery, Authenticated, ClientContext,
};
use crate::presentation::http::response::{ApiResponse, Created};
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitIdeaRequest {
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Both decision fields are optional on the wire so that a missing one yields
/// the workflow's own validation message rather than a deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EvaluateIdeaRequest {
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub nurture_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewListParams {
    /// Comma separated statuses; defaults to ideas awaiting evaluation.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyIdeasParams {
    #[serde(default)]
    pub status: Option<IdeaStatus>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<String>,
}

fn parse_statuses(raw: Option<&str>) -> HttpResult<Vec<IdeaStatus>> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.parse::<IdeaStatus>())
            .collect::<Result<Vec<_>, _>>()
    })
    .transpose()
    .map(Option::unwrap_or_default)
    .map_err(|err| HttpError::from_error(err.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/student/ideas",
    request_body = SubmitIdeaRequest,
    responses(
        (status = 201, description = "Idea submitted.", body = ApiResponse<IdeaDto>),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Ideas"
)]
pub async fn submit_idea(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiJson(payload): ApiJson<SubmitIdeaRequest>,
) -> HttpResult<Created<IdeaDto>> {
    let command = SubmitIdeaCommand {
        title: payload.title,
        description: payload.description,
        category: payload.category,
    };

    state
        .services
        .idea_commands
        .submit(&user, command, &ctx)
        .await
        .into_http()
        .map(|idea| Created(ApiResponse::with_message(idea, "idea submitted")))
}

#[utoipa::path(
    get,
    path = "/api/v1/student/ideas",
    params(MyIdeasParams),
    responses(
        (status = 200, description = "The caller's own ideas, newest first.", body = ApiResponse<CursorPage<IdeaDto>>),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Ideas"
)]
pub async fn list_my_ideas(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<MyIdeasParams>,
) -> HttpResult<ApiResponse<CursorPage<IdeaDto>>> {
    let query = ListMyIdeasQuery {
        status: params.status,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .idea_queries
        .list_mine(&user, query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Idea details.", body = ApiResponse<IdeaDto>),
        (status = 403, description = "Idea is outside the caller's scope.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Idea not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Ideas"
)]
pub async fn get_idea(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<ApiResponse<IdeaDto>> {
    state
        .services
        .idea_queries
        .get_idea(&user, id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}/evaluations",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Evaluation history, oldest first.", body = ApiResponse<Vec<EvaluationDto>>),
        (status = 403, description = "Idea is outside the caller's scope.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Idea not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Ideas"
)]
pub async fn list_evaluations(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<ApiResponse<Vec<EvaluationDto>>> {
    state
        .services
        .idea_queries
        .list_evaluations(&user, id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    get,
    path = "/api/v1/college-coordinator/ideas",
    params(ReviewListParams),
    responses(
        (status = 200, description = "Ideas in the reviewer's scope.", body = ApiResponse<CursorPage<IdeaDto>>),
        (status = 400, description = "Unknown status.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn list_ideas_for_review(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<ReviewListParams>,
) -> HttpResult<ApiResponse<CursorPage<IdeaDto>>> {
    let query = ListIdeasForReviewQuery {
        statuses: parse_statuses(params.status.as_deref())?,
        category: params.category,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .idea_queries
        .list_for_review(&user, query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    post,
    path = "/api/v1/college-coordinator/ideas/{id}/review",
    params(("id" = i64, Path, description = "Idea id")),
    responses(
        (status = 200, description = "Idea is under review.", body = ApiResponse<IdeaDto>),
        (status = 403, description = "Idea is outside the reviewer's scope.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Idea not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Idea is not in a reviewable state.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn start_review(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<ApiResponse<IdeaDto>> {
    state
        .services
        .idea_commands
        .start_review(&user, id, &ctx)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    post,
    path = "/api/v1/college-coordinator/ideas/{id}/evaluate",
    params(("id" = i64, Path, description = "Idea id")),
    request_body = EvaluateIdeaRequest,
    responses(
        (status = 200, description = "Evaluation recorded.", body = ApiResponse<EvaluationOutcomeDto>),
        (status = 400, description = "Rating or recommendation missing or invalid.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Idea is outside the reviewer's scope.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Idea not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Idea changed concurrently or is already decided.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn evaluate_idea(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<EvaluateIdeaRequest>,
) -> HttpResult<ApiResponse<EvaluationOutcomeDto>> {
    let command = EvaluateIdeaCommand {
        rating: payload.rating,
        recommendation: payload.recommendation,
        comments: payload.comments,
        nurture_notes: payload.nurture_notes,
    };

    state
        .services
        .idea_commands
        .evaluate(&user, id, command, &ctx)
        .await
        .into_http()
        .map(|outcome| ApiResponse::with_message(outcome, "evaluation submitted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_from_comma_list() {
        let parsed = parse_statuses(Some("submitted, under_review")).unwrap();
        assert_eq!(parsed, vec![IdeaStatus::Submitted, IdeaStatus::UnderReview]);
        assert!(parse_statuses(None).unwrap().is_empty());
        assert!(parse_statuses(Some("archived")).is_err());
    }
}

// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{LoginUserCommand, RegisterUserCommand, UpdateProfileCommand},
    dto::{AuthTokenDto, UserDto, UserProfileDto},
};
use crate::domain::user::Role;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiJson, Authenticated, ClientContext, MaybeAuthenticated,
};
use crate::presentation::http::response::{ApiResponse, Created};
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub college_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub session_revoked: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Create an account. The very first account is bootstrapped as super admin;
/// afterwards the caller needs `users:create`.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created.", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing capability.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    ClientContext(ctx): ClientContext,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> HttpResult<Created<UserDto>> {
    let command = RegisterUserCommand {
        username: payload.username,
        password: payload.password,
        display_name: payload.display_name,
        role: payload.role,
        college_id: payload.college_id,
    };

    state
        .services
        .user_commands
        .register(actor.0.as_ref(), command, &ctx)
        .await
        .into_http()
        .map(|user| Created(ApiResponse::ok(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued.", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    ClientContext(ctx): ClientContext,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> HttpResult<ApiResponse<LoginResponse>> {
    let command = LoginUserCommand {
        username: payload.username,
        password: payload.password,
    };

    let result = state
        .services
        .user_commands
        .login(command, &ctx)
        .await
        .into_http()?;

    Ok(ApiResponse::with_message(
        LoginResponse {
            token: result.token,
            user: result.user,
        },
        "login successful",
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session revoked.", body = ApiResponse<LogoutResponse>),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
) -> HttpResult<ApiResponse<LogoutResponse>> {
    state
        .services
        .user_commands
        .logout(&user, &ctx)
        .await
        .into_http()?;

    Ok(ApiResponse::with_message(
        LogoutResponse {
            session_revoked: user.session_id.is_some(),
        },
        "logged out",
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user profile.", body = ApiResponse<UserProfileDto>),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

#[utoipa::path(
    patch,
    path = "/api/v1/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated.", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ClientContext(ctx): ClientContext,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    let command = UpdateProfileCommand {
        display_name: payload.display_name,
    };

    state
        .services
        .user_commands
        .update_profile(&user, command, &ctx)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

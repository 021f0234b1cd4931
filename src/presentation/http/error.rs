// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::errors::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ApplicationError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ApplicationError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ApplicationError::Unauthorized(msg) => Self::new(StatusCode::UNAUTHORIZED, msg),
            ApplicationError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, msg),
            ApplicationError::Infrastructure(msg) => Self::internal(msg),
            ApplicationError::Domain(domain_err) => Self::from_domain(domain_err),
        }
    }

    fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            DomainError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            DomainError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            DomainError::Persistence(msg) => Self::internal(msg),
        }
    }

    /// Internal details are logged, never returned to the client.
    fn internal(detail: String) -> Self {
        error!(error = %detail, "request failed with an internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    }

    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            success: false,
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "json body rejected");
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection, "query string rejected");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "path parameter rejected");
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

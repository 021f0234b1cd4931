// src/presentation/http/extractors.rs
use crate::{
    application::{
        dto::{AuthenticatedUser, RequestContext},
        error::ApplicationError,
    },
    presentation::http::state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{HeaderMap, request::Parts},
};
use headers::{Authorization, HeaderMapExt, UserAgent, authorization::Bearer};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

use super::error::HttpError;

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

/// Client address and user agent, as recorded in audit entries.
#[derive(Debug, Clone, Default)]
pub struct ClientContext(pub RequestContext);

/// `Json` whose rejections use the failure envelope.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections use the failure envelope.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejections use the failure envelope.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

async fn app_state<S>(parts: &mut Parts, state: &S) -> Result<HttpState, HttpError>
where
    S: Send + Sync,
{
    let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            HttpError::from_error(ApplicationError::Infrastructure(
                "application state missing".into(),
            ))
        })?;
    Ok(app_state)
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "missing Authorization header".into(),
                ))
            })?;

        let user = app_state
            .services
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(header) => {
                let user = app_state
                    .services
                    .authenticate(header.token())
                    .await
                    .map_err(HttpError::from_error)?;
                Ok(Self(Some(user)))
            }
            None => Ok(Self(None)),
        }
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_context(&parts.headers)))
    }
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .map(str::to_string)
}

pub(crate) fn client_context(headers: &HeaderMap) -> RequestContext {
    let user_agent = headers
        .typed_get::<UserAgent>()
        .map(|agent| agent.as_str().to_string());
    RequestContext::new(client_ip(headers), user_agent)
}

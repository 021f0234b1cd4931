// tests/support/helpers.rs
use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use ideaflow_core::application::{
    commands::ideas::SubmitIdeaCommand,
    dto::{AuthenticatedUser, IdeaDto, RequestContext},
    services::{ApplicationServices, Repositories},
};
use ideaflow_core::infrastructure::security::session_store::InMemorySessionRevocationStore;
use ideaflow_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

use super::mocks::{
    DummyTokenManager, FixedClock, InMemoryAuditRepo, InMemoryIdeaRepo, InMemoryNotificationRepo,
    InMemoryUserRepo, PlainPasswordHasher, STUDENT_TOKEN, actor,
};

/// Services wired to in-memory adapters, with handles to inspect what they wrote.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub users: Arc<InMemoryUserRepo>,
    pub ideas: Arc<InMemoryIdeaRepo>,
    pub audit: Arc<InMemoryAuditRepo>,
    pub notifications: Arc<InMemoryNotificationRepo>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_users(InMemoryUserRepo::seeded())
    }

    pub fn with_users(users: InMemoryUserRepo) -> Self {
        let users = Arc::new(users);
        let ideas = Arc::new(InMemoryIdeaRepo::new());
        let audit = Arc::new(InMemoryAuditRepo::new());
        let notifications = Arc::new(InMemoryNotificationRepo::new());

        let services = Arc::new(ApplicationServices::new(
            Repositories {
                users: users.clone(),
                ideas: ideas.clone(),
                audit_logs: audit.clone(),
                notifications: notifications.clone(),
            },
            Arc::new(PlainPasswordHasher),
            Arc::new(DummyTokenManager::new()),
            Arc::new(InMemorySessionRevocationStore::new()),
            Arc::new(FixedClock),
        ));

        Self {
            services,
            users,
            ideas,
            audit,
            notifications,
        }
    }

    pub fn router(&self) -> Router {
        build_router(HttpState::new(Arc::clone(&self.services)), &[])
    }

    /// Submits an idea as the default student and returns it.
    pub async fn submit_idea(&self, title: &str) -> IdeaDto {
        self.submit_idea_as(STUDENT_TOKEN, title).await
    }

    pub async fn submit_idea_as(&self, token: &str, title: &str) -> IdeaDto {
        self.services
            .idea_commands
            .submit(
                &user(token),
                SubmitIdeaCommand {
                    title: title.to_string(),
                    description: format!("{title} description"),
                    category: "agritech".to_string(),
                },
                &RequestContext::default(),
            )
            .await
            .expect("submit idea")
    }
}

pub fn user(token: &str) -> AuthenticatedUser {
    actor(token).unwrap_or_else(|| panic!("unknown test token {token}"))
}

pub fn ctx() -> RequestContext {
    RequestContext::new(Some("10.0.0.4".into()), Some("ideaflow-tests".into()))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Sends the request and decodes the JSON body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, token, body).await;
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("expected a JSON body")
    };
    (status, json)
}

pub async fn body_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Asserts the failure envelope and returns its message.
pub fn assert_error_envelope(status: StatusCode, json: &Value, expected: StatusCode) -> String {
    assert_eq!(status, expected, "unexpected status, body: {json}");
    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"].as_str(),
        expected.canonical_reason(),
        "unexpected error field"
    );
    let message = json["message"].as_str().unwrap_or_default().to_string();
    assert!(!message.is_empty(), "expected a non-empty message");
    message
}

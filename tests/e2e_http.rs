// tests/e2e_http.rs
use axum::http::{Method, StatusCode, header};
use ideaflow_core::application::commands::ideas::EVALUATION_FIELDS_REQUIRED;
use ideaflow_core::domain::{notification::NotificationKind, user::UserId};
use serde_json::json;

mod support;
use support::*;

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = TestApp::new().router();

    let (status, body) = send_json(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send_json(&app, Method::GET, "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/college-coordinator/ideas/{id}/evaluate"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearerAuth"].is_object());
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = TestApp::new().router();

    let (status, body) =
        send_json(&app, Method::GET, "/api/v1/notifications", None, None).await;
    assert_error_envelope(status, &body, StatusCode::UNAUTHORIZED);

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/v1/student/ideas",
        Some("forged-token"),
        None,
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submit_review_and_evaluate_over_http() {
    let test_app = TestApp::new();
    let app = test_app.router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/student/ideas",
        Some(STUDENT_TOKEN),
        Some(json!({
            "title": "Solar crop dryer",
            "description": "Dries grain with a passive solar chimney",
            "category": "AgriTech"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "submitted");
    assert_eq!(body["data"]["category"], "agritech");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, queue) = send_json(
        &app,
        Method::GET,
        "/api/v1/college-coordinator/ideas",
        Some(COORDINATOR_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue["data"]["items"][0]["id"], id);

    let evaluate_uri = format!("/api/v1/college-coordinator/ideas/{id}/evaluate");
    let (status, body) = send_json(
        &app,
        Method::POST,
        &evaluate_uri,
        Some(COORDINATOR_TOKEN),
        Some(json!({ "rating": 8, "recommendation": "forward", "comments": "Ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "evaluation submitted");
    assert_eq!(body["data"]["idea"]["status"], "forward");
    assert_eq!(body["data"]["evaluation"]["rating"], 8);

    let (_, queue) = send_json(
        &app,
        Method::GET,
        "/api/v1/college-coordinator/ideas",
        Some(COORDINATOR_TOKEN),
        None,
    )
    .await;
    assert_eq!(queue["data"]["items"].as_array().map(Vec::len), Some(0));

    let (status, inbox) = send_json(
        &app,
        Method::GET,
        "/api/v1/notifications?unread_only=true",
        Some(STUDENT_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox["data"]["items"][0]["type"], "success");
    assert_eq!(inbox["data"]["items"][0]["data"]["idea_id"], id);

    let (status, history) = send_json(
        &app,
        Method::GET,
        &format!("/api/v1/ideas/{id}/evaluations"),
        Some(STUDENT_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send_json(
        &app,
        Method::POST,
        &evaluate_uri,
        Some(COORDINATOR_TOKEN),
        Some(json!({ "rating": 2, "recommendation": "reject" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::CONFLICT);
    assert_eq!(test_app.ideas.evaluations().len(), 1);
}

#[tokio::test]
async fn evaluation_without_decision_fields_is_a_bad_request() {
    let test_app = TestApp::new();
    let idea = test_app.submit_idea("Water purifier").await;
    let app = test_app.router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/college-coordinator/ideas/{}/evaluate", idea.id),
        Some(COORDINATOR_TOKEN),
        Some(json!({ "comments": "looks fine" })),
    )
    .await;
    let message = assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);
    assert_eq!(message, EVALUATION_FIELDS_REQUIRED);
    assert!(test_app.ideas.evaluations().is_empty());
}

#[tokio::test]
async fn malformed_bodies_and_paths_get_the_failure_envelope() {
    let test_app = TestApp::new();
    let idea = test_app.submit_idea("Greywater reuse kit").await;
    let app = test_app.router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/college-coordinator/ideas/{}/evaluate", idea.id),
        Some(COORDINATOR_TOKEN),
        Some(json!({ "rating": "8", "recommendation": "forward" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/college-coordinator/ideas/abc/evaluate",
        Some(COORDINATOR_TOKEN),
        Some(json!({ "rating": 8, "recommendation": "forward" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);
    assert!(test_app.ideas.evaluations().is_empty());
}

#[tokio::test]
async fn malformed_query_strings_get_the_failure_envelope() {
    let app = TestApp::new().router();
    for uri in [
        "/api/v1/admin/audit-logs?user_id=abc",
        "/api/v1/admin/audit-logs/export?user_id=abc",
        "/api/v1/notifications?limit=many",
    ] {
        let token = if uri.starts_with("/api/v1/admin") { ADMIN_TOKEN } else { STUDENT_TOKEN };
        let (status, body) = send_json(&app, Method::GET, uri, Some(token), None).await;
        assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn review_filters_reject_unknown_statuses() {
    let app = TestApp::new().router();
    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/v1/college-coordinator/ideas?status=archived",
        Some(COORDINATOR_TOKEN),
        None,
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn audit_export_is_a_csv_attachment() {
    let test_app = TestApp::new();
    test_app.submit_idea("Bamboo bike frames").await;
    let app = test_app.router();

    let response = send(
        &app,
        Method::GET,
        "/api/v1/admin/audit-logs/export?action=IDEA_SUBMIT",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"audit-logs-20240501-090000.csv\""
    );

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Timestamp,User,Action"));
    assert!(lines[1].contains("IDEA_SUBMIT"));
}

#[tokio::test]
async fn audit_routes_validate_dates_and_capabilities() {
    let app = TestApp::new().router();

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/v1/admin/audit-logs?start_date=05/01/2024",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/v1/admin/audit-logs",
        Some(STUDENT_TOKEN),
        None,
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::FORBIDDEN);

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/v1/admin/audit-logs?start_date=&end_date=&action=",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
}

#[tokio::test]
async fn coordinator_alias_marks_notifications_read() {
    let test_app = TestApp::new();
    for title in ["First", "Second"] {
        test_app
            .services
            .notification_commands
            .notify(
                UserId::new(COORDINATOR_ID).unwrap(),
                NotificationKind::Info,
                title,
                "New idea awaiting review",
                json!({}),
            )
            .await
            .unwrap();
    }
    let app = test_app.router();

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/v1/college-coordinator/notifications/2/read",
        Some(COORDINATOR_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["data"]["id"], 2);
    assert_eq!(body["data"]["is_read"], true);

    let (_, count) = send_json(
        &app,
        Method::GET,
        "/api/v1/notifications/unread-count",
        Some(COORDINATOR_TOKEN),
        None,
    )
    .await;
    assert_eq!(count["data"]["count"], 1);

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/v1/notifications/1/read",
        Some(STUDENT_TOKEN),
        None,
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_profile_and_logout_revoke_the_session() {
    let app = TestApp::new().router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "meera", "password": SEEDED_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "login successful");
    assert_eq!(body["data"]["user"]["role"], "college_admin");
    let token = body["data"]["token"]["token"].as_str().unwrap().to_string();

    let (status, me) = send_json(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["user"]["username"], "meera");

    let (status, renamed) = send_json(
        &app,
        Method::PATCH,
        "/api/v1/auth/me",
        Some(&token),
        Some(json!({ "display_name": "Meera Iyer" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {renamed}");
    assert_eq!(renamed["data"]["display_name"], "Meera Iyer");

    let (status, body) =
        send_json(&app, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["session_revoked"], true);

    let (status, body) = send_json(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    let message = assert_error_envelope(status, &body, StatusCode::UNAUTHORIZED);
    assert!(message.contains("session revoked"));
}

#[tokio::test]
async fn bad_credentials_get_the_failure_envelope() {
    let app = TestApp::new().router();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "meera", "password": "not-the-password" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn first_registration_bootstraps_a_super_admin() {
    let test_app = TestApp::with_users(InMemoryUserRepo::empty());
    let app = test_app.router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "founder",
            "password": "Str0ng!Passw0rd",
            "role": "student"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    assert_eq!(body["data"]["role"], "super_admin");

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "second", "password": "Str0ng!Passw0rd" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::FORBIDDEN);
    assert_eq!(test_app.audit.actions(), vec!["USER_CREATE".to_string()]);
}

#[tokio::test]
async fn admins_register_further_accounts() {
    let app = TestApp::new().router();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        Some(ADMIN_TOKEN),
        Some(json!({
            "username": "priya",
            "password": "Str0ng!Passw0rd",
            "role": "college_admin",
            "college_id": COLLEGE_ID
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    assert_eq!(body["data"]["role"], "college_admin");
    assert_eq!(body["data"]["college_id"], COLLEGE_ID);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        Some(ADMIN_TOKEN),
        Some(json!({ "username": "priya", "password": "Str0ng!Passw0rd" })),
    )
    .await;
    assert_error_envelope(status, &body, StatusCode::CONFLICT);
}

// tests/notifications.rs
use chrono::Duration;
use ideaflow_core::application::{
    error::ApplicationError, queries::notifications::ListNotificationsQuery,
};
use ideaflow_core::domain::{
    notification::{NotificationKind, NotificationRepository},
    user::UserId,
};
use serde_json::json;

mod support;
use support::*;

/// Delivers `count` notifications to the default student, ids `1..=count`.
async fn seed_inbox(app: &TestApp, count: usize) {
    for n in 1..=count {
        app.services
            .notification_commands
            .notify(
                UserId::new(STUDENT_ID).unwrap(),
                NotificationKind::Info,
                &format!("Update {n}"),
                "Something happened",
                json!({ "seq": n }),
            )
            .await
            .unwrap();
    }
}

fn unread(app: &TestApp) -> Vec<i64> {
    app.notifications
        .for_user(STUDENT_ID)
        .into_iter()
        .filter(|n| !n.is_read)
        .map(|n| n.id)
        .collect()
}

#[tokio::test]
async fn marking_one_notification_leaves_the_rest_unread() {
    let app = TestApp::new();
    seed_inbox(&app, 6).await;

    let marked = app
        .services
        .notification_commands
        .mark_read(&user(STUDENT_TOKEN), 5, &ctx())
        .await
        .unwrap();

    assert_eq!(marked.id, 5);
    assert!(marked.is_read);
    assert_eq!(marked.read_at, Some(fixed_now()));
    assert_eq!(unread(&app), vec![1, 2, 3, 4, 6]);

    let entry = app.audit.entries().pop().expect("mark read is audited");
    assert_eq!(entry.action.as_str(), "NOTIFICATION_READ");
    assert_eq!(entry.resource_id, Some(5));
}

#[tokio::test]
async fn another_users_notification_is_reported_missing() {
    let app = TestApp::new();
    seed_inbox(&app, 5).await;

    let err = app
        .services
        .notification_commands
        .mark_read(&user(OTHER_STUDENT_TOKEN), 5, &ctx())
        .await
        .unwrap_err();

    match err {
        ApplicationError::NotFound(msg) => assert_eq!(msg, "notification not found"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(unread(&app).len(), 5);
    assert!(app.audit.entries().is_empty());
}

#[tokio::test]
async fn unknown_notification_is_not_found() {
    let app = TestApp::new();
    let err = app
        .services
        .notification_commands
        .mark_read(&user(STUDENT_TOKEN), 42, &ctx())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn marking_twice_keeps_the_first_read_time() {
    let app = TestApp::new();
    seed_inbox(&app, 1).await;
    let earlier = fixed_now() - Duration::minutes(30);
    app.notifications
        .mark_read(1, UserId::new(STUDENT_ID).unwrap(), earlier)
        .await
        .unwrap();

    let again = app
        .services
        .notification_commands
        .mark_read(&user(STUDENT_TOKEN), 1, &ctx())
        .await
        .unwrap();

    assert!(again.is_read);
    assert_eq!(again.read_at, Some(earlier));
}

#[tokio::test]
async fn unread_count_and_filtered_listing_track_reads() {
    let app = TestApp::new();
    seed_inbox(&app, 3).await;
    let student = user(STUDENT_TOKEN);

    let before = app
        .services
        .notification_queries
        .unread_count(&student)
        .await
        .unwrap();
    assert_eq!(before.count, 3);

    app.services
        .notification_commands
        .mark_read(&student, 2, &ctx())
        .await
        .unwrap();

    let after = app
        .services
        .notification_queries
        .unread_count(&student)
        .await
        .unwrap();
    assert_eq!(after.count, 2);

    let page = app
        .services
        .notification_queries
        .list(
            &student,
            ListNotificationsQuery {
                unread_only: true,
                limit: None,
                cursor: None,
            },
        )
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![3, 1]);

    let others = app
        .services
        .notification_queries
        .unread_count(&user(OTHER_STUDENT_TOKEN))
        .await
        .unwrap();
    assert_eq!(others.count, 0);
}

#[tokio::test]
async fn listing_pages_with_a_cursor() {
    let app = TestApp::new();
    seed_inbox(&app, 5).await;
    let student = user(STUDENT_TOKEN);

    let first = app
        .services
        .notification_queries
        .list(
            &student,
            ListNotificationsQuery {
                unread_only: false,
                limit: Some(2),
                cursor: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(first.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5, 4]);
    assert!(first.has_more);

    let second = app
        .services
        .notification_queries
        .list(
            &student,
            ListNotificationsQuery {
                unread_only: false,
                limit: Some(2),
                cursor: first.next_cursor,
            },
        )
        .await
        .unwrap();
    assert_eq!(second.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 2]);
}

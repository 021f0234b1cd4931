// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use ideaflow_core::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use ideaflow_core::domain::user::{Role, UserId};
use std::{collections::HashMap, sync::Mutex};

use super::time::fixed_now;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const STUDENT_TOKEN: &str = "student-token";
pub const OTHER_STUDENT_TOKEN: &str = "other-student-token";
pub const COORDINATOR_TOKEN: &str = "coordinator-token";
pub const OTHER_COLLEGE_TOKEN: &str = "other-college-token";
pub const MANAGER_TOKEN: &str = "manager-token";

pub const ADMIN_ID: i64 = 1;
pub const STUDENT_ID: i64 = 10;
pub const OTHER_STUDENT_ID: i64 = 11;
pub const COORDINATOR_ID: i64 = 20;
pub const OTHER_COLLEGE_COORDINATOR_ID: i64 = 21;
pub const MANAGER_ID: i64 = 30;

pub const COLLEGE_ID: i64 = 3;
pub const OTHER_COLLEGE_ID: i64 = 4;

/// `(token, id, username, role, college)` for every pre-authenticated test actor.
pub const TEST_ACTORS: [(&str, i64, &str, Role, Option<i64>); 6] = [
    (ADMIN_TOKEN, ADMIN_ID, "root", Role::SuperAdmin, None),
    (STUDENT_TOKEN, STUDENT_ID, "asha", Role::Student, Some(COLLEGE_ID)),
    (OTHER_STUDENT_TOKEN, OTHER_STUDENT_ID, "ravi", Role::Student, Some(COLLEGE_ID)),
    (COORDINATOR_TOKEN, COORDINATOR_ID, "meera", Role::CollegeAdmin, Some(COLLEGE_ID)),
    (
        OTHER_COLLEGE_TOKEN,
        OTHER_COLLEGE_COORDINATOR_ID,
        "kiran",
        Role::CollegeAdmin,
        Some(OTHER_COLLEGE_ID),
    ),
    (MANAGER_TOKEN, MANAGER_ID, "nisha", Role::IncubatorManager, None),
];

/// Resolves the fixed actor tokens above and also remembers every token it
/// issues, so login followed by an authenticated call works end to end.
#[derive(Debug, Default)]
pub struct DummyTokenManager {
    issued: Mutex<HashMap<String, TokenSubject>>,
}

impl DummyTokenManager {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn actor(token: &str) -> Option<AuthenticatedUser> {
    let now = fixed_now();
    TEST_ACTORS
        .iter()
        .find(|(t, ..)| *t == token)
        .map(|(t, id, username, role, college)| AuthenticatedUser {
            id: UserId::new(*id).expect("invalid user id"),
            username: (*username).to_string(),
            role: *role,
            college_id: *college,
            capabilities: role.default_capabilities(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            session_id: Some(format!("session-{t}")),
        })
}

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = fixed_now();
        let token = format!(
            "issued-{}-{}",
            subject.user_id,
            subject.session_id.as_deref().unwrap_or("none")
        );
        let session_id = subject.session_id.clone();
        self.issued
            .lock()
            .unwrap()
            .insert(token.clone(), subject);
        Ok(AuthTokenDto {
            token,
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
            session_id,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        if let Some(user) = actor(token) {
            return Ok(user);
        }
        let now = fixed_now();
        self.issued
            .lock()
            .unwrap()
            .get(token)
            .map(|subject| AuthenticatedUser {
                id: subject.user_id,
                username: subject.username.clone(),
                role: subject.role,
                college_id: subject.college_id,
                capabilities: subject.capabilities.clone(),
                issued_at: now,
                expires_at: now + Duration::hours(1),
                session_id: subject.session_id.clone(),
            })
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))
    }
}

/// Stores `hashed:<password>` so verification is a plain comparison.
#[derive(Clone, Debug, Default)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

// src/domain/user/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::user::value_objects::{DisplayName, PasswordHash, Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub college_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub college_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        display_name: DisplayName,
        password_hash: PasswordHash,
        role: Role,
        college_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            username,
            display_name,
            password_hash,
            role,
            college_id,
            is_active: true,
            created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub display_name: Option<DisplayName>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, display_name: DisplayName) -> Self {
        self.display_name = Some(display_name);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
    }
}

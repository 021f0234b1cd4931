// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    DisplayName, NewUser, PasswordHash, User, UserId, UserRepository, UserUpdate, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const USER_COLUMNS: &str =
    "id, username, display_name, password_hash, role, college_id, is_active, created_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    display_name: String,
    password_hash: String,
    role: String,
    college_id: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            display_name: DisplayName::new(row.display_name)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse()?,
            college_id: row.college_id,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(|count| count.max(0) as u64)
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            username,
            display_name,
            password_hash,
            role,
            college_id,
            is_active,
            created_at,
        } = new_user;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, display_name, password_hash, role, college_id, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(display_name.as_str())
        .bind(password_hash.as_str())
        .bind(role.as_str())
        .bind(college_id)
        .bind(is_active)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        User::try_from(row)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let UserUpdate { id, display_name } = update;
        let display_name = display_name.ok_or_else(|| {
            DomainError::Validation("no fields provided for update".into())
        })?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET display_name = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(display_name.as_str())
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }
}

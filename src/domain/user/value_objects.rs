// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    pub fn matches(&self, resource: &str, action: &str) -> bool {
        self.resource == resource && self.action == action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    CollegeAdmin,
    IncubatorManager,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::CollegeAdmin => "college_admin",
            Role::IncubatorManager => "incubator_manager",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn default_capabilities(&self) -> HashSet<Capability> {
        use Capability as Cap;
        match self {
            Role::Student => HashSet::from([
                Cap::new("ideas", "submit"),
                Cap::new("ideas", "read:own"),
                Cap::new("notifications", "read"),
            ]),
            Role::CollegeAdmin => HashSet::from([
                Cap::new("ideas", "read:college"),
                Cap::new("ideas", "review:college"),
                Cap::new("ideas", "evaluate:college"),
                Cap::new("notifications", "read"),
            ]),
            Role::IncubatorManager => HashSet::from([
                Cap::new("ideas", "read:any"),
                Cap::new("notifications", "read"),
            ]),
            Role::SuperAdmin => HashSet::from([
                Cap::new("ideas", "read:any"),
                Cap::new("ideas", "review:any"),
                Cap::new("ideas", "evaluate:any"),
                Cap::new("audit", "read"),
                Cap::new("audit", "export"),
                Cap::new("users", "create"),
                Cap::new("users", "read"),
                Cap::new("notifications", "read"),
            ]),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "college_admin" => Ok(Role::CollegeAdmin),
            "incubator_manager" => Ok(Role::IncubatorManager),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("username cannot be empty".into()));
        }
        if value.len() < 3 {
            return Err(DomainError::Validation(
                "username must be at least 3 characters long".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LEN: usize = 120;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("display name cannot be empty".into()));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Validation(format!(
                "display name must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "password hash cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

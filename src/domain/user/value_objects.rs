// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

/// Portal role. Every access decision matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Reader,
    Journalist,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Journalist => "journalist",
            Role::Editor => "editor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Reader => "Reader",
            Role::Journalist => "Journalist",
            Role::Editor => "Editor",
        }
    }

    /// Whether the role submits articles and newsletters.
    pub fn can_author(&self) -> bool {
        match self {
            Role::Journalist => true,
            Role::Reader | Role::Editor => false,
        }
    }

    /// Whether the role approves or denies submissions.
    pub fn can_review(&self) -> bool {
        match self {
            Role::Editor => true,
            Role::Reader | Role::Journalist => false,
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
            "reader" => Ok(Role::Reader),
            "journalist" => Ok(Role::Journalist),
            "editor" => Ok(Role::Editor),
            other => Err(DomainError::invalid_field(
                "role",
                format!("unknown role '{other}'"),
            )),
        }
    }
}

/// The identity an access decision is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub is_staff: bool,
}

impl Principal {
    pub fn new(id: UserId, role: Role, is_staff: bool) -> Self {
        Self { id, role, is_staff }
    }

    pub fn may_author(&self) -> bool {
        self.is_staff || self.role.can_author()
    }

    pub fn may_review(&self) -> bool {
        self.is_staff || self.role.can_review()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_field("username", "cannot be empty"));
        }
        if trimmed.chars().count() < 3 {
            return Err(DomainError::invalid_field(
                "username",
                "must be at least 3 characters long",
            ));
        }
        if trimmed.chars().count() > 150 {
            return Err(DomainError::invalid_field(
                "username",
                "must be at most 150 characters long",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(DomainError::invalid_field("email", "must contain '@'"));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(DomainError::invalid_field("email", "is not a valid address"));
        }
        // Anything the mail transport would refuse is rejected here.
        trimmed
            .parse::<lettre::Address>()
            .map_err(|_| DomainError::invalid_field("email", "is not a valid address"))?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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

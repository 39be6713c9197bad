use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub i64);

impl ContentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "content id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ContentId> for i64 {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two publishable content types. They share one workflow and differ only
/// in labels, title length and whether a publisher is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Newsletter,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Newsletter => "newsletter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Article => "Article",
            ContentKind::Newsletter => "Newsletter",
        }
    }

    pub fn requires_publisher(&self) -> bool {
        match self {
            ContentKind::Article => true,
            ContentKind::Newsletter => false,
        }
    }

    pub fn max_title_chars(&self) -> usize {
        match self {
            ContentKind::Article => 200,
            ContentKind::Newsletter => 255,
        }
    }

    pub fn notification_subject(&self, title: &ContentTitle) -> String {
        match self {
            ContentKind::Article => format!("New Article Published: {title}"),
            ContentKind::Newsletter => format!("New Newsletter: {title}"),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(ContentKind::Article),
            "newsletter" => Ok(ContentKind::Newsletter),
            other => Err(DomainError::Validation(format!(
                "unknown content kind '{other}'"
            ))),
        }
    }
}

/// Review status of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Denied => "denied",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending review",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Denied => "Denied",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalStatus::Approved)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "denied" => Ok(ApprovalStatus::Denied),
            other => Err(DomainError::invalid_field(
                "status",
                format!("unknown status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTitle(String);

impl ContentTitle {
    pub fn new(kind: ContentKind, value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_field("title", "cannot be empty"));
        }
        let max = kind.max_title_chars();
        if trimmed.chars().count() > max {
            return Err(DomainError::invalid_field(
                "title",
                format!("must be at most {max} characters"),
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

impl fmt::Display for ContentTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBody(String);

impl ContentBody {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_field("body", "cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// First `max_chars` characters, with an ellipsis appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.0.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}…", &self.0[..cut]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for ContentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

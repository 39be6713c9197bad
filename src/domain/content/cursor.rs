use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Position in a newest-first content listing: `(created_at, id)` of the last
/// item already returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl ContentCursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.created_at.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::invalid_field("cursor", "invalid cursor token");
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (created_at, id) = raw.split_once('|').ok_or_else(invalid)?;
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(created_at, id))
    }

    /// True when an item at `(created_at, id)` sorts strictly after this
    /// cursor in newest-first order.
    pub fn precedes(&self, created_at: DateTime<Utc>, id: i64) -> bool {
        (created_at, id) < (self.created_at, self.id)
    }
}

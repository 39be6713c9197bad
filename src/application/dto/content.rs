use crate::domain::content::{ApprovalStatus, ContentItem, ContentKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentDto {
    pub id: i64,
    #[schema(value_type = String, example = "article")]
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
    #[schema(value_type = String, example = "pending")]
    pub status: ApprovalStatus,
    pub author_id: i64,
    #[serde(default)]
    pub publisher_id: Option<i64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ContentItem> for ContentDto {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.into(),
            kind: item.kind,
            title: item.title.into_inner(),
            body: item.body.into_inner(),
            status: item.status,
            author_id: item.author_id.into(),
            publisher_id: item.publisher_id.map(Into::into),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

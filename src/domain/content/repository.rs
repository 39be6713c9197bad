use crate::domain::content::cursor::ContentCursor;
use crate::domain::content::entity::{ContentItem, ContentUpdate, NewContentItem, StatusUpdate};
use crate::domain::content::value_objects::{ApprovalStatus, ContentId, ContentKind};
use crate::domain::errors::DomainResult;
use crate::domain::subscription::Subscriptions;
use async_trait::async_trait;

#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    async fn insert(&self, item: NewContentItem) -> DomainResult<ContentItem>;

    /// Writes title, body and publisher. The stored status is untouched.
    async fn update_content(&self, update: ContentUpdate) -> DomainResult<ContentItem>;

    /// Compare-and-set on the status column. Returns `None` when the stored
    /// status no longer equals `update.expected`.
    async fn update_status(&self, update: StatusUpdate) -> DomainResult<Option<ContentItem>>;

    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()>;
}

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(&self, kind: ContentKind, id: ContentId)
    -> DomainResult<Option<ContentItem>>;

    /// Newest first, strictly after `filter.cursor`, at most `filter.limit` items.
    async fn list_page(&self, filter: &ContentFilter) -> DomainResult<Vec<ContentItem>>;
}

#[derive(Debug, Clone)]
pub struct ContentFilter {
    pub kind: ContentKind,
    pub status: Option<ApprovalStatus>,
    /// When set, only items whose author is a followed journalist or whose
    /// publisher is a followed publisher.
    pub audience: Option<Subscriptions>,
    pub cursor: Option<ContentCursor>,
    pub limit: usize,
}

impl ContentFilter {
    pub fn new(kind: ContentKind, limit: usize) -> Self {
        Self {
            kind,
            status: None,
            audience: None,
            cursor: None,
            limit,
        }
    }

    /// In-memory form of the filter, shared by non-SQL stores.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if item.kind != self.kind {
            return false;
        }
        if self.status.is_some_and(|status| status != item.status) {
            return false;
        }
        if let Some(cursor) = &self.cursor {
            if !cursor.precedes(item.created_at, item.id.0) {
                return false;
            }
        }
        match &self.audience {
            Some(audience) => {
                audience.journalists.contains(&item.author_id)
                    || item
                        .publisher_id
                        .is_some_and(|publisher| audience.publishers.contains(&publisher))
            }
            None => true,
        }
    }
}

// src/domain/content/entity.rs
use crate::domain::content::value_objects::{
    ApprovalStatus, ContentBody, ContentId, ContentKind, ContentTitle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub title: ContentTitle,
    pub body: ContentBody,
    pub status: ApprovalStatus,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    pub fn set_content(
        &mut self,
        title: ContentTitle,
        body: ContentBody,
        publisher_id: Option<PublisherId>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        ensure_publisher(self.kind, publisher_id)?;
        self.title = title;
        self.body = body;
        self.publisher_id = publisher_id;
        self.updated_at = now;
        Ok(())
    }
}

fn ensure_publisher(kind: ContentKind, publisher_id: Option<PublisherId>) -> DomainResult<()> {
    if kind.requires_publisher() && publisher_id.is_none() {
        return Err(DomainError::invalid_field(
            "publisher",
            format!("an {} requires a publisher", kind.as_str()),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub kind: ContentKind,
    pub title: ContentTitle,
    pub body: ContentBody,
    pub status: ApprovalStatus,
    pub author_id: UserId,
    pub publisher_id: Option<PublisherId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewContentItem {
    /// A fresh submission. Status always starts at `Pending`.
    pub fn submission(
        kind: ContentKind,
        title: ContentTitle,
        body: ContentBody,
        author_id: UserId,
        publisher_id: Option<PublisherId>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        ensure_publisher(kind, publisher_id)?;
        Ok(Self {
            kind,
            title,
            body,
            status: ApprovalStatus::Pending,
            author_id,
            publisher_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overrides the initial status, for imports and fixtures. Inserting an
    /// item never counts as a review transition.
    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.status = status;
        self
    }
}

/// Content-field change written by the author. Never carries a status.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub id: ContentId,
    pub kind: ContentKind,
    pub title: ContentTitle,
    pub body: ContentBody,
    pub publisher_id: Option<PublisherId>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUpdate {
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            title: item.title.clone(),
            body: item.body.clone(),
            publisher_id: item.publisher_id,
            updated_at: item.updated_at,
        }
    }
}

/// Conditional status write: applied only while the stored status still
/// equals `expected`.
#[derive(Debug, Clone, Copy)]
pub struct StatusUpdate {
    pub id: ContentId,
    pub kind: ContentKind,
    pub expected: ApprovalStatus,
    pub next: ApprovalStatus,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn title(kind: ContentKind) -> ContentTitle {
        ContentTitle::new(kind, "Breaking").unwrap()
    }

    fn body() -> ContentBody {
        ContentBody::new("Story").unwrap()
    }

    #[test]
    fn submissions_start_pending() {
        let item = NewContentItem::submission(
            ContentKind::Article,
            title(ContentKind::Article),
            body(),
            UserId::new(2).unwrap(),
            Some(PublisherId::new(1).unwrap()),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(item.status, ApprovalStatus::Pending);
    }

    #[test]
    fn articles_require_a_publisher() {
        let err = NewContentItem::submission(
            ContentKind::Article,
            title(ContentKind::Article),
            body(),
            UserId::new(2).unwrap(),
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidField {
                field: "publisher",
                ..
            }
        ));
    }

    #[test]
    fn newsletters_may_omit_publisher() {
        assert!(
            NewContentItem::submission(
                ContentKind::Newsletter,
                title(ContentKind::Newsletter),
                body(),
                UserId::new(2).unwrap(),
                None,
                Utc::now(),
            )
            .is_ok()
        );
    }

    #[test]
    fn set_content_leaves_status_alone() {
        let now = Utc::now();
        let mut item = ContentItem {
            id: ContentId::new(1).unwrap(),
            kind: ContentKind::Article,
            title: title(ContentKind::Article),
            body: body(),
            status: ApprovalStatus::Approved,
            author_id: UserId::new(2).unwrap(),
            publisher_id: Some(PublisherId::new(1).unwrap()),
            created_at: now,
            updated_at: now,
        };
        let later = now + chrono::Duration::seconds(5);
        item.set_content(
            ContentTitle::new(ContentKind::Article, "Updated").unwrap(),
            ContentBody::new("New body").unwrap(),
            item.publisher_id,
            later,
        )
        .unwrap();
        assert_eq!(item.status, ApprovalStatus::Approved);
        assert_eq!(item.updated_at, later);
        assert_eq!(item.title.as_str(), "Updated");
    }
}

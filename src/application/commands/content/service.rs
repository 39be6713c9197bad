// src/application/commands/content/service.rs
use std::sync::Arc;

use tracing::info;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult, FieldErrors},
        notifications::NotificationService,
        ports::time::Clock,
    },
    domain::{
        content::{
            ApprovalStatus, ContentId, ContentItem, ContentKind, ContentReadRepository,
            ContentWriteRepository, StatusTransition, StatusUpdate,
            specifications::CanViewContentSpec,
        },
        publisher::{PublisherId, PublisherRepository},
    },
};

pub struct ContentCommandService {
    pub(super) write_repo: Arc<dyn ContentWriteRepository>,
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) publisher_repo: Arc<dyn PublisherRepository>,
    pub(super) notifications: Arc<NotificationService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ContentCommandService {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
        notifications: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            publisher_repo,
            notifications,
            clock,
        }
    }

    pub(super) async fn load(&self, kind: ContentKind, id: i64) -> ApplicationResult<ContentItem> {
        let id = ContentId::new(id)?;
        self.read_repo
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} not found", kind.as_str())))
    }

    /// Loads an item for a mutation by `actor`. Items the actor can neither see
    /// nor owns are reported as missing.
    pub(super) async fn load_for(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        id: i64,
    ) -> ApplicationResult<ContentItem> {
        let item = self.load(kind, id).await?;
        let principal = actor.principal();
        if !item.is_authored_by(actor.id)
            && !CanViewContentSpec::new(Some(&principal), &item).is_satisfied()
        {
            return Err(ApplicationError::not_found(format!("{} not found", kind.as_str())));
        }
        Ok(item)
    }

    /// Resolves a client-supplied publisher id. The acting journalist must be
    /// on the publisher's journalist staff unless they are a staff account.
    pub(super) async fn resolve_publisher(
        &self,
        actor: &AuthenticatedUser,
        raw: Option<i64>,
        errors: &mut FieldErrors,
    ) -> ApplicationResult<Option<PublisherId>> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let Some(id) = errors.take("publisher", PublisherId::new(raw))? else {
            return Ok(None);
        };
        match self.publisher_repo.find_by_id(id).await? {
            None => {
                errors.push("publisher", format!("publisher {raw} does not exist"));
                Ok(None)
            }
            Some(publisher) if !actor.is_staff && !publisher.employs_journalist(actor.id) => {
                errors.push(
                    "publisher",
                    format!("you are not a journalist at {}", publisher.name),
                );
                Ok(None)
            }
            Some(publisher) => Ok(Some(publisher.id)),
        }
    }

    /// Moves an item to `next`. The persisted status is compared and swapped
    /// in one write; subscribers are notified only after that write commits
    /// and only when it crossed `Pending -> Approved`.
    pub(super) async fn apply_transition(
        &self,
        actor: &AuthenticatedUser,
        item: ContentItem,
        next: ApprovalStatus,
    ) -> ApplicationResult<ContentItem> {
        let transition = StatusTransition::new(item.status, next);
        if transition.is_noop() {
            return Ok(item);
        }

        let update = StatusUpdate {
            id: item.id,
            kind: item.kind,
            expected: transition.before,
            next: transition.after,
            updated_at: self.clock.now(),
        };
        let updated = self.write_repo.update_status(update).await?.ok_or_else(|| {
            ApplicationError::conflict(format!(
                "{} {} changed status concurrently",
                item.kind.as_str(),
                item.id
            ))
        })?;

        info!(
            content_id = %updated.id,
            kind = %updated.kind,
            from = %transition.before,
            to = %transition.after,
            reviewer = %actor.id,
            "content status changed"
        );

        if transition.publishes() {
            self.notifications.dispatch(updated.clone()).await;
        }
        Ok(updated)
    }
}

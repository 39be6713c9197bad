use super::ContentCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::content::{
        ApprovalStatus, ContentBody, ContentItem, ContentKind, ContentTitle, ContentUpdate,
        specifications::{CanEditContentSpec, CanReviewContentSpec},
    },
};

/// Partial update. Content fields belong to the author; a differing `status`
/// goes through the approval workflow and needs reviewer rights.
pub struct UpdateContentCommand {
    pub kind: ContentKind,
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    /// `Some(None)` detaches the item from its publisher.
    pub publisher_id: Option<Option<i64>>,
    pub status: Option<String>,
}

impl UpdateContentCommand {
    fn touches_content(&self) -> bool {
        self.title.is_some() || self.body.is_some() || self.publisher_id.is_some()
    }
}

impl ContentCommandService {
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let item = self.load_for(actor, command.kind, command.id).await?;
        let principal = actor.principal();

        let mut errors = FieldErrors::new();
        let requested_status = match command.status.as_deref() {
            Some(raw) => errors.take("status", raw.parse::<ApprovalStatus>())?,
            None => None,
        };
        let status_change = requested_status.filter(|status| *status != item.status);

        if command.touches_content() && !CanEditContentSpec::new(&principal, &item).is_satisfied()
        {
            return Err(ApplicationError::forbidden(
                "only the author may edit this content",
            ));
        }
        if status_change.is_some() && !CanReviewContentSpec::new(&principal).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only editors may change the status",
            ));
        }

        let content_saved = command.touches_content();
        let item = if content_saved {
            self.apply_content_update(actor, item, command, errors).await?
        } else {
            errors.finish()?;
            item
        };

        let item = match status_change {
            Some(next) => self
                .apply_transition(actor, item, next)
                .await
                .map_err(|err| match err {
                    ApplicationError::Conflict(message) if content_saved => {
                        ApplicationError::conflict(format!(
                            "{message}; the content changes were saved but the status was not changed"
                        ))
                    }
                    other => other,
                })?,
            None => item,
        };
        Ok(item.into())
    }

    async fn apply_content_update(
        &self,
        actor: &AuthenticatedUser,
        mut item: ContentItem,
        command: UpdateContentCommand,
        mut errors: FieldErrors,
    ) -> ApplicationResult<ContentItem> {
        let kind = item.kind;
        let title = match command.title {
            Some(title) => errors.take("title", ContentTitle::new(kind, title))?,
            None => Some(item.title.clone()),
        };
        let body = match command.body {
            Some(body) => errors.take("body", ContentBody::new(body))?,
            None => Some(item.body.clone()),
        };
        let publisher_id = match command.publisher_id {
            Some(Some(raw)) => self.resolve_publisher(actor, Some(raw), &mut errors).await?,
            Some(None) => None,
            None => item.publisher_id,
        };
        errors.finish()?;

        let (Some(title), Some(body)) = (title, body) else {
            return Err(ApplicationError::validation("title and body are required"));
        };
        item.set_content(title, body, publisher_id, self.clock.now())?;
        Ok(self
            .write_repo
            .update_content(ContentUpdate::from_item(&item))
            .await?)
    }
}

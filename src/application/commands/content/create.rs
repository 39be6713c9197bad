use tracing::debug;

use super::ContentCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::content::{
        ContentBody, ContentKind, ContentTitle, NewContentItem,
        specifications::CanCreateContentSpec,
    },
};

pub struct CreateContentCommand {
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
    pub publisher_id: Option<i64>,
    /// Accepted for form compatibility and ignored: new items start pending.
    pub status: Option<String>,
}

impl ContentCommandService {
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        command: CreateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let principal = actor.principal();
        if !CanCreateContentSpec::new(&principal).is_satisfied() {
            return Err(ApplicationError::forbidden(format!(
                "only journalists may create {}s",
                command.kind.as_str()
            )));
        }

        let CreateContentCommand {
            kind,
            title,
            body,
            publisher_id,
            status,
        } = command;
        if let Some(status) = status {
            debug!(requested = %status, "ignoring client-supplied status on create");
        }

        let mut errors = FieldErrors::new();
        let title = errors.take("title", ContentTitle::new(kind, title))?;
        let body = errors.take("body", ContentBody::new(body))?;
        let publisher_given = publisher_id.is_some();
        let publisher_id = self.resolve_publisher(actor, publisher_id, &mut errors).await?;
        if kind.requires_publisher() && !publisher_given {
            errors.push("publisher", format!("an {} requires a publisher", kind.as_str()));
        }
        errors.finish()?;

        let (Some(title), Some(body)) = (title, body) else {
            return Err(ApplicationError::validation("title and body are required"));
        };
        let new_item =
            NewContentItem::submission(kind, title, body, actor.id, publisher_id, self.clock.now())?;
        let created = self.write_repo.insert(new_item).await?;
        debug!(content_id = %created.id, kind = %created.kind, author = %actor.id, "content submitted");
        Ok(created.into())
    }
}

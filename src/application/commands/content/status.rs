use super::ContentCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::content::{
        ApprovalStatus, ContentKind, ReviewDecision, specifications::CanReviewContentSpec,
    },
};

pub struct ChangeStatusCommand {
    pub kind: ContentKind,
    pub id: i64,
    pub status: String,
}

/// Approve/deny from the review queue. Only pending items can be reviewed.
pub struct ReviewContentCommand {
    pub kind: ContentKind,
    pub id: i64,
    pub decision: ReviewDecision,
}

impl ContentCommandService {
    pub async fn change_status(
        &self,
        actor: &AuthenticatedUser,
        command: ChangeStatusCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_reviewer(actor)?;
        let mut errors = FieldErrors::new();
        let next = errors.take("status", command.status.parse::<ApprovalStatus>())?;
        errors.finish()?;
        let Some(next) = next else {
            return Err(ApplicationError::invalid_field("status", "status is required"));
        };

        let item = self.load(command.kind, command.id).await?;
        Ok(self.apply_transition(actor, item, next).await?.into())
    }

    pub async fn review(
        &self,
        actor: &AuthenticatedUser,
        command: ReviewContentCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_reviewer(actor)?;
        let item = self.load(command.kind, command.id).await?;
        if item.status != ApprovalStatus::Pending {
            return Err(ApplicationError::not_found(format!(
                "no pending {} with id {}",
                command.kind.as_str(),
                command.id
            )));
        }
        Ok(self
            .apply_transition(actor, item, command.decision.target())
            .await?
            .into())
    }
}

fn ensure_reviewer(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if CanReviewContentSpec::new(&actor.principal()).is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "only editors may approve or deny content",
        ))
    }
}

use super::ContentCommandService;
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentKind, specifications::CanDeleteContentSpec},
};

pub struct DeleteContentCommand {
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentCommandService {
    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteContentCommand,
    ) -> ApplicationResult<()> {
        let item = self.load_for(actor, command.kind, command.id).await?;
        if !CanDeleteContentSpec::new(&actor.principal(), &item).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only the author may delete this content",
            ));
        }
        self.write_repo.delete(item.kind, item.id).await?;
        Ok(())
    }
}

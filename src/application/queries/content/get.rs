use super::ContentQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentId, ContentKind, specifications::CanViewContentSpec},
};

pub struct GetContentQuery {
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentQueryService {
    /// Items the viewer may not see are indistinguishable from missing ones.
    pub async fn get(
        &self,
        viewer: Option<&AuthenticatedUser>,
        query: GetContentQuery,
    ) -> ApplicationResult<ContentDto> {
        let not_found = || ApplicationError::not_found(format!("{} not found", query.kind.as_str()));
        let id = ContentId::new(query.id).map_err(|_| not_found())?;
        let item = self
            .read_repo
            .find_by_id(query.kind, id)
            .await?
            .ok_or_else(not_found)?;

        let principal = viewer.map(AuthenticatedUser::principal);
        if !CanViewContentSpec::new(principal.as_ref(), &item).is_satisfied() {
            return Err(not_found());
        }
        Ok(item.into())
    }
}

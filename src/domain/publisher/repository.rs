use crate::domain::errors::DomainResult;
use crate::domain::publisher::{
    entity::{NewPublisher, Publisher, StaffRoster},
    value_objects::PublisherId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait PublisherRepository: Send + Sync {
    async fn insert(&self, publisher: NewPublisher) -> DomainResult<Publisher>;

    async fn find_by_id(&self, id: PublisherId) -> DomainResult<Option<Publisher>>;

    async fn list(&self) -> DomainResult<Vec<Publisher>>;

    /// Adds `user_id` to the roster; adding an existing member is a no-op.
    async fn add_staff(
        &self,
        id: PublisherId,
        roster: StaffRoster,
        user_id: UserId,
    ) -> DomainResult<Publisher>;
}

use crate::domain::errors::DomainResult;
use crate::domain::publisher::PublisherId;
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Persistence for the two asymmetric follow relations a user holds.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn follow_journalist(&self, follower: UserId, journalist: UserId) -> DomainResult<()>;

    async fn unfollow_journalist(&self, follower: UserId, journalist: UserId)
    -> DomainResult<()>;

    async fn follow_publisher(&self, follower: UserId, publisher: PublisherId)
    -> DomainResult<()>;

    async fn unfollow_publisher(
        &self,
        follower: UserId,
        publisher: PublisherId,
    ) -> DomainResult<()>;

    /// Replaces both follow sets of `follower` in one step.
    async fn replace(&self, follower: UserId, subscriptions: &Subscriptions) -> DomainResult<()>;

    async fn subscriptions_of(&self, follower: UserId) -> DomainResult<Subscriptions>;

    async fn followers_of_journalist(&self, journalist: UserId) -> DomainResult<Vec<UserId>>;

    async fn followers_of_publisher(&self, publisher: PublisherId) -> DomainResult<Vec<UserId>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pub journalists: Vec<UserId>,
    pub publishers: Vec<PublisherId>,
}

impl Subscriptions {
    pub fn is_empty(&self) -> bool {
        self.journalists.is_empty() && self.publishers.is_empty()
    }
}

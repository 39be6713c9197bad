// src/application/commands/subscriptions.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, SubscriptionsDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::{
        errors::DomainError,
        publisher::{PublisherId, PublisherRepository},
        subscription::{SubscriptionRepository, Subscriptions},
        user::{Role, UserId, UserRepository},
    },
};

pub struct ReplaceSubscriptionsCommand {
    pub journalists: Vec<i64>,
    pub publishers: Vec<i64>,
}

/// Follow and unfollow operations. All of them are idempotent and answer
/// with the follower's resulting subscriptions.
pub struct SubscriptionCommandService {
    subscription_repo: Arc<dyn SubscriptionRepository>,
    user_repo: Arc<dyn UserRepository>,
    publisher_repo: Arc<dyn PublisherRepository>,
}

impl SubscriptionCommandService {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepository>,
        user_repo: Arc<dyn UserRepository>,
        publisher_repo: Arc<dyn PublisherRepository>,
    ) -> Self {
        Self {
            subscription_repo,
            user_repo,
            publisher_repo,
        }
    }

    pub async fn follow_journalist(
        &self,
        actor: &AuthenticatedUser,
        journalist_id: i64,
    ) -> ApplicationResult<SubscriptionsDto> {
        let journalist = self.existing_journalist(journalist_id).await?;
        self.subscription_repo
            .follow_journalist(actor.id, journalist)
            .await?;
        self.current(actor).await
    }

    pub async fn unfollow_journalist(
        &self,
        actor: &AuthenticatedUser,
        journalist_id: i64,
    ) -> ApplicationResult<SubscriptionsDto> {
        let journalist = self.existing_journalist(journalist_id).await?;
        self.subscription_repo
            .unfollow_journalist(actor.id, journalist)
            .await?;
        self.current(actor).await
    }

    pub async fn follow_publisher(
        &self,
        actor: &AuthenticatedUser,
        publisher_id: i64,
    ) -> ApplicationResult<SubscriptionsDto> {
        let publisher = self.existing_publisher(publisher_id).await?;
        self.subscription_repo
            .follow_publisher(actor.id, publisher)
            .await?;
        self.current(actor).await
    }

    pub async fn unfollow_publisher(
        &self,
        actor: &AuthenticatedUser,
        publisher_id: i64,
    ) -> ApplicationResult<SubscriptionsDto> {
        let publisher = self.existing_publisher(publisher_id).await?;
        self.subscription_repo
            .unfollow_publisher(actor.id, publisher)
            .await?;
        self.current(actor).await
    }

    /// Bulk form update: both follow sets are replaced after every id checks out.
    pub async fn replace_subscriptions(
        &self,
        actor: &AuthenticatedUser,
        command: ReplaceSubscriptionsCommand,
    ) -> ApplicationResult<SubscriptionsDto> {
        let mut errors = FieldErrors::new();
        let mut journalists = BTreeSet::new();
        for raw in command.journalists {
            match self.existing_journalist(raw).await {
                Ok(id) => {
                    journalists.insert(id);
                }
                Err(
                    ApplicationError::NotFound(_)
                    | ApplicationError::Domain(DomainError::Validation(_)),
                ) => {
                    errors.push("journalists", format!("{raw} is not a journalist"));
                }
                Err(other) => return Err(other),
            }
        }
        let mut publishers = BTreeSet::new();
        for raw in command.publishers {
            match self.existing_publisher(raw).await {
                Ok(id) => {
                    publishers.insert(id);
                }
                Err(
                    ApplicationError::NotFound(_)
                    | ApplicationError::Domain(DomainError::Validation(_)),
                ) => {
                    errors.push("publishers", format!("publisher {raw} does not exist"));
                }
                Err(other) => return Err(other),
            }
        }
        errors.finish()?;

        let subscriptions = Subscriptions {
            journalists: journalists.into_iter().collect(),
            publishers: publishers.into_iter().collect(),
        };
        self.subscription_repo
            .replace(actor.id, &subscriptions)
            .await?;
        self.current(actor).await
    }

    async fn current(&self, actor: &AuthenticatedUser) -> ApplicationResult<SubscriptionsDto> {
        Ok(self.subscription_repo.subscriptions_of(actor.id).await?.into())
    }

    async fn existing_journalist(&self, raw: i64) -> ApplicationResult<UserId> {
        let id = UserId::new(raw)?;
        match self.user_repo.find_by_id(id).await? {
            Some(user) if user.role == Role::Journalist => Ok(user.id),
            _ => Err(ApplicationError::not_found("journalist not found")),
        }
    }

    async fn existing_publisher(&self, raw: i64) -> ApplicationResult<PublisherId> {
        let id = PublisherId::new(raw)?;
        self.publisher_repo
            .find_by_id(id)
            .await?
            .map(|publisher| publisher.id)
            .ok_or_else(|| ApplicationError::not_found("publisher not found"))
    }
}

// src/domain/content/services/mod.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::content::entity::ContentItem;
use crate::domain::errors::DomainResult;
use crate::domain::subscription::SubscriptionRepository;
use crate::domain::user::{User, UserId, UserRepository};

/// Domain service computing who hears about a newly approved item.
pub struct SubscriberResolver {
    subscriptions: Arc<dyn SubscriptionRepository>,
    users: Arc<dyn UserRepository>,
}

impl SubscriberResolver {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            subscriptions,
            users,
        }
    }

    /// Followers of the author united with followers of the publisher.
    /// A user following both appears once.
    pub async fn subscriber_ids(&self, item: &ContentItem) -> DomainResult<BTreeSet<UserId>> {
        let mut ids: BTreeSet<UserId> = self
            .subscriptions
            .followers_of_journalist(item.author_id)
            .await?
            .into_iter()
            .collect();
        if let Some(publisher_id) = item.publisher_id {
            ids.extend(self.subscriptions.followers_of_publisher(publisher_id).await?);
        }
        Ok(ids)
    }

    /// Active subscriber accounts, one per distinct id.
    pub async fn recipients(&self, item: &ContentItem) -> DomainResult<Vec<User>> {
        let ids: Vec<UserId> = self.subscriber_ids(item).await?.into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.users.find_many(&ids).await?;
        Ok(users.into_iter().filter(|user| user.is_active).collect())
    }
}

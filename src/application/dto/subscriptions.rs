use crate::domain::subscription::Subscriptions;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Journalists and publishers a user follows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionsDto {
    pub journalists: Vec<i64>,
    pub publishers: Vec<i64>,
}

impl From<Subscriptions> for SubscriptionsDto {
    fn from(subscriptions: Subscriptions) -> Self {
        Self {
            journalists: subscriptions.journalists.into_iter().map(Into::into).collect(),
            publishers: subscriptions.publishers.into_iter().map(Into::into).collect(),
        }
    }
}

use std::sync::Arc;

use crate::domain::{content::ContentReadRepository, subscription::SubscriptionRepository};

pub struct ContentQueryService {
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) subscription_repo: Arc<dyn SubscriptionRepository>,
}

impl ContentQueryService {
    pub fn new(
        read_repo: Arc<dyn ContentReadRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            read_repo,
            subscription_repo,
        }
    }
}

use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::{subscription::SubscriptionRepository, user::UserRepository};

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) subscription_repo: Arc<dyn SubscriptionRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserQueryService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
            clock,
        }
    }
}

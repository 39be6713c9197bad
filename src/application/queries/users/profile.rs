use super::UserQueryService;
use crate::application::{
    dto::{AuthenticatedUser, SubscriptionsDto, UserProfileDto},
    error::{ApplicationError, ApplicationResult},
};

impl UserQueryService {
    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;
        let subscriptions = self.subscriptions(actor).await?;

        Ok(UserProfileDto::from_parts(
            user,
            subscriptions,
            actor,
            self.clock.now(),
        ))
    }

    pub async fn subscriptions(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<SubscriptionsDto> {
        Ok(self.subscription_repo.subscriptions_of(actor.id).await?.into())
    }
}

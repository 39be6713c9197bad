// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            content::ContentCommandService, publishers::PublisherCommandService,
            subscriptions::SubscriptionCommandService, users::UserCommandService,
        },
        dto::AuthenticatedUser,
        notifications::{NotificationService, NotificationSettings},
        ports::{
            notification::{Broadcaster, Mailer},
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{
            content::ContentQueryService, publishers::PublisherQueryService,
            users::UserQueryService,
        },
    },
    domain::{
        content::{ContentReadRepository, ContentWriteRepository, SubscriberResolver},
        publisher::PublisherRepository,
        subscription::SubscriptionRepository,
        user::UserRepository,
    },
};

/// Repository implementations the services are built on.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub publishers: Arc<dyn PublisherRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub content_write: Arc<dyn ContentWriteRepository>,
    pub content_read: Arc<dyn ContentReadRepository>,
}

/// Outbound adapters and infrastructure services.
pub struct Adapters {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub mailer: Arc<dyn Mailer>,
    pub broadcaster: Arc<dyn Broadcaster>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub content_commands: Arc<ContentCommandService>,
    pub content_queries: Arc<ContentQueryService>,
    pub publisher_commands: Arc<PublisherCommandService>,
    pub publisher_queries: Arc<PublisherQueryService>,
    pub subscription_commands: Arc<SubscriptionCommandService>,
    notifications: Arc<NotificationService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(repos: Repositories, adapters: Adapters, settings: NotificationSettings) -> Self {
        let resolver = Arc::new(SubscriberResolver::new(
            Arc::clone(&repos.subscriptions),
            Arc::clone(&repos.users),
        ));
        let notifications = Arc::new(NotificationService::new(
            resolver,
            Arc::clone(&adapters.mailer),
            Arc::clone(&adapters.broadcaster),
            settings,
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&adapters.password_hasher),
            Arc::clone(&adapters.token_manager),
            Arc::clone(&adapters.clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.subscriptions),
            Arc::clone(&adapters.clock),
        ));

        let content_commands = Arc::new(ContentCommandService::new(
            Arc::clone(&repos.content_write),
            Arc::clone(&repos.content_read),
            Arc::clone(&repos.publishers),
            Arc::clone(&notifications),
            Arc::clone(&adapters.clock),
        ));
        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&repos.content_read),
            Arc::clone(&repos.subscriptions),
        ));

        let publisher_commands = Arc::new(PublisherCommandService::new(
            Arc::clone(&repos.publishers),
            Arc::clone(&repos.users),
        ));
        let publisher_queries = Arc::new(PublisherQueryService::new(Arc::clone(&repos.publishers)));

        let subscription_commands = Arc::new(SubscriptionCommandService::new(
            Arc::clone(&repos.subscriptions),
            Arc::clone(&repos.users),
            Arc::clone(&repos.publishers),
        ));

        Self {
            user_commands,
            user_queries,
            content_commands,
            content_queries,
            publisher_commands,
            publisher_queries,
            subscription_commands,
            notifications,
            token_manager: adapters.token_manager,
        }
    }

    pub fn notifications(&self) -> Arc<NotificationService> {
        Arc::clone(&self.notifications)
    }

    /// Verifies a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}

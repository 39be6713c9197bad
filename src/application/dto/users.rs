use crate::domain::user::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{auth::AuthenticatedUser, serde_time, subscriptions::SubscriptionsDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[schema(value_type = String, example = "journalist")]
    pub role: Role,
    pub is_staff: bool,
    pub is_active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into_inner(),
            email: user.email.into_inner(),
            role: user.role,
            is_staff: user.is_staff,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Public view of a journalist; no contact details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JournalistDto {
    pub id: i64,
    pub username: String,
}

impl From<User> for JournalistDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub subscriptions: SubscriptionsDto,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl UserProfileDto {
    pub fn from_parts(
        user: User,
        subscriptions: SubscriptionsDto,
        auth: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_in = auth.expires_at.signed_duration_since(now).num_seconds().max(0);
        Self {
            user: user.into(),
            subscriptions,
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}

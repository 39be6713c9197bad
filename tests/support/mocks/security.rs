// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{Duration, Utc};
use news_portal::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Stores passwords with a visible prefix; good enough to exercise login.
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("plain${password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("plain${password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Hands out opaque tokens and remembers who they belong to.
#[derive(Default)]
pub struct StaticTokenManager {
    issued: Mutex<HashMap<String, AuthenticatedUser>>,
}

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let mut issued = self.issued.lock().unwrap();
        let token = format!("token-{}-{}", subject.user_id, issued.len() + 1);
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::hours(1);
        issued.insert(
            token.clone(),
            AuthenticatedUser {
                id: subject.user_id,
                username: subject.username,
                role: subject.role,
                is_staff: subject.is_staff,
                issued_at,
                expires_at,
            },
        );
        Ok(AuthTokenDto {
            token,
            issued_at,
            expires_at,
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.issued
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))
    }
}

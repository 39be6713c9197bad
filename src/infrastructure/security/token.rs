// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

const TOKEN_CODE: &str = r"
    user({uid}, {uname});
    role({urole});
    staff({ustaff});
    issued_at({issued});
    expires_at({exp});
    check if time($now), $now >= {issued};
    check if time($now), $now <= {exp};
";

const AUTHORIZER_POLICY: &str = "allow if user($id, $name);";

/// Issues and verifies Ed25519-signed Biscuit bearer tokens.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
        })
    }
}

fn token_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> HashMap<String, Term> {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("uname".to_string(), subject.username.clone().into());
    params.insert("urole".to_string(), subject.role.as_str().into());
    params.insert("ustaff".to_string(), subject.is_staff.into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());
    params
}

fn infra(err: impl ToString) -> ApplicationError {
    ApplicationError::infrastructure(err.to_string())
}

fn unauthorized(err: impl ToString) -> ApplicationError {
    ApplicationError::unauthorized(err.to_string())
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let token = Biscuit::builder()
            .code_with_params(
                TOKEN_CODE,
                token_params(&subject, issued_at, expires_at),
                HashMap::new(),
            )
            .map_err(infra)?
            .build(self.root.as_ref())
            .map_err(infra)?;
        let serialized = token.seal().map_err(infra)?.to_base64().map_err(infra)?;

        Ok(AuthTokenDto {
            token: serialized,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public).map_err(unauthorized)?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code(AUTHORIZER_POLICY)
            .map_err(infra)?
            .build(&biscuit)
            .map_err(unauthorized)?;
        authorizer.authorize().map_err(unauthorized)?;

        let (facts, _, _, _) = authorizer.dump();
        crate::infrastructure::security::claims::parse_claims(facts)
    }
}

// src/infrastructure/security/claims.rs
//! Maps the facts of a verified token back to an [`AuthenticatedUser`].
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut ctx = ClaimsContext::default();
    for fact in facts {
        ctx.apply_predicate(&fact.predicate);
    }
    ctx.into_user()
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    is_staff: Option<bool>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

fn missing(claim: &str) -> ApplicationError {
    ApplicationError::unauthorized(format!("missing {claim}"))
}

fn as_time(term: Option<&Term>) -> Option<SystemTime> {
    match term {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}

impl ClaimsContext {
    fn apply_predicate(&mut self, predicate: &Predicate) {
        let first = predicate.terms.first();
        match predicate.name.as_str() {
            "user" => {
                if let [Term::Integer(id), Term::Str(name)] = predicate.terms.as_slice() {
                    self.user_id = Some(*id);
                    self.username = Some(name.clone());
                }
            }
            "role" => {
                if let Some(Term::Str(role)) = first {
                    self.role = role.parse().ok();
                }
            }
            "staff" => {
                if let Some(Term::Bool(flag)) = first {
                    self.is_staff = Some(*flag);
                }
            }
            "issued_at" => self.issued_at = as_time(first),
            "expires_at" => self.expires_at = as_time(first),
            _ => {}
        }
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let id = self.user_id.ok_or_else(|| missing("user id"))?;
        let id = UserId::new(id).map_err(|_| ApplicationError::unauthorized("invalid user id"))?;

        Ok(AuthenticatedUser {
            id,
            username: self.username.ok_or_else(|| missing("username"))?,
            role: self.role.ok_or_else(|| missing("role"))?,
            is_staff: self.is_staff.unwrap_or(false),
            issued_at: DateTime::<Utc>::from(self.issued_at.ok_or_else(|| missing("issued_at"))?),
            expires_at: DateTime::<Utc>::from(
                self.expires_at.ok_or_else(|| missing("expires_at"))?,
            ),
        })
    }
}

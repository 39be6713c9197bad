// src/presentation/web/session.rs
use super::{error::PortalError, views::ViewerView};
use crate::application::dto::AuthenticatedUser;
use crate::presentation::http::extractors::{app_state, bearer_token};
use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, request::Parts},
};
use headers::{Cookie, HeaderMapExt};
use tracing::debug;

pub const SESSION_COOKIE: &str = "portal_token";

/// The signed-in portal user, if any. A stale or forged session reads as
/// anonymous.
#[derive(Debug, Clone)]
pub struct PortalViewer(pub Option<AuthenticatedUser>);

impl PortalViewer {
    pub fn view(&self) -> Option<ViewerView> {
        self.0.as_ref().map(ViewerView::from)
    }
}

/// A portal page that requires a signed-in user; anonymous visitors are sent
/// to the login form.
#[derive(Debug, Clone)]
pub struct PortalUser(pub AuthenticatedUser);

impl PortalUser {
    pub fn view(&self) -> ViewerView {
        ViewerView::from(&self.0)
    }
}

fn session_token(parts: &Parts) -> Option<String> {
    bearer_token(parts).or_else(|| {
        parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_string))
    })
}

impl<S> FromRequestParts<S> for PortalViewer
where
    S: Send + Sync,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state)
            .await
            .map_err(|error| PortalError::Page {
                error,
                viewer: None,
            })?;

        let Some(token) = session_token(parts) else {
            return Ok(Self(None));
        };

        match app_state.services.authenticate(&token).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(err) => {
                debug!(error = %err, "ignoring invalid portal session");
                Ok(Self(None))
            }
        }
    }
}

impl<S> FromRequestParts<S> for PortalUser
where
    S: Send + Sync,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let PortalViewer(viewer) = PortalViewer::from_request_parts(parts, state).await?;
        viewer.map(Self).ok_or(PortalError::LoginRequired)
    }
}

pub fn session_cookie(token: &str, max_age_secs: i64) -> Result<HeaderValue, PortalError> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/portal; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax"
    ))
    .map_err(|_| PortalError::render_failure("session token is not a valid cookie value".into()))
}

pub fn cleared_cookie() -> HeaderValue {
    HeaderValue::from_static("portal_token=; Path=/portal; Max-Age=0; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: (&str, &str)) -> Parts {
        let (parts, _) = Request::builder()
            .header(header.0, header.1)
            .body(())
            .expect("request")
            .into_parts();
        parts
    }

    #[test]
    fn session_token_reads_the_cookie() {
        let parts = parts(("cookie", "theme=dark; portal_token=abc"));
        assert_eq!(session_token(&parts).as_deref(), Some("abc"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut parts = parts(("cookie", "portal_token=abc"));
        parts
            .headers
            .insert("authorization", HeaderValue::from_static("Bearer xyz"));
        assert_eq!(session_token(&parts).as_deref(), Some("xyz"));
    }

    #[test]
    fn session_cookie_is_scoped_to_the_portal() {
        let value = session_cookie("abc", 60).expect("cookie");
        let text = value.to_str().expect("ascii");
        assert!(text.starts_with("portal_token=abc;"));
        assert!(text.contains("Path=/portal"));
        assert!(text.contains("HttpOnly"));
    }
}

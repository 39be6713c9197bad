// src/presentation/web/follows.rs
use super::{
    error::{IntoPortalResult, PortalResult},
    session::PortalUser,
};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Form, extract::Path, response::Redirect};
use serde::Deserialize;

const FALLBACK_TARGET: &str = "/portal/articles";

#[derive(Debug, Default, Deserialize)]
pub struct ReturnTo {
    #[serde(default)]
    pub next: Option<String>,
}

/// Only same-site portal paths are accepted as redirect targets.
fn return_target(form: &ReturnTo) -> String {
    match form.next.as_deref() {
        Some(next) if next.starts_with("/portal/") && !next.contains("//") => next.to_string(),
        _ => FALLBACK_TARGET.to_string(),
    }
}

pub async fn follow_journalist(
    Extension(state): Extension<HttpState>,
    user: PortalUser,
    Path(id): Path<i64>,
    Form(form): Form<ReturnTo>,
) -> PortalResult<Redirect> {
    state
        .services
        .subscription_commands
        .follow_journalist(&user.0, id)
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(&return_target(&form)))
}

pub async fn unfollow_journalist(
    Extension(state): Extension<HttpState>,
    user: PortalUser,
    Path(id): Path<i64>,
    Form(form): Form<ReturnTo>,
) -> PortalResult<Redirect> {
    state
        .services
        .subscription_commands
        .unfollow_journalist(&user.0, id)
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(&return_target(&form)))
}

pub async fn follow_publisher(
    Extension(state): Extension<HttpState>,
    user: PortalUser,
    Path(id): Path<i64>,
    Form(form): Form<ReturnTo>,
) -> PortalResult<Redirect> {
    state
        .services
        .subscription_commands
        .follow_publisher(&user.0, id)
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(&return_target(&form)))
}

pub async fn unfollow_publisher(
    Extension(state): Extension<HttpState>,
    user: PortalUser,
    Path(id): Path<i64>,
    Form(form): Form<ReturnTo>,
) -> PortalResult<Redirect> {
    state
        .services
        .subscription_commands
        .unfollow_publisher(&user.0, id)
        .await
        .into_page(Some(&user.view()))?;
    Ok(Redirect::to(&return_target(&form)))
}

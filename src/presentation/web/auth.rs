// src/presentation/web/auth.rs
use super::{
    error::{PortalError, PortalResult},
    session::{PortalViewer, cleared_cookie, session_cookie},
    views::{base_context, page},
};
use crate::application::{commands::users::LoginUserCommand, error::ApplicationError};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login_form(viewer: PortalViewer) -> PortalResult<Response> {
    if viewer.0.is_some() {
        return Ok(Redirect::to("/portal/articles").into_response());
    }
    let mut context = base_context(None);
    context.insert("username", "");
    context.insert("error", &Option::<String>::None);
    Ok(page("login.html", &context)?.into_response())
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    Form(form): Form<LoginForm>,
) -> PortalResult<Response> {
    let username = form.username.clone();
    let command = LoginUserCommand {
        username: form.username,
        password: form.password,
    };

    match state.services.user_commands.login(command).await {
        Ok(result) => {
            info!(user_id = result.user.id, "portal sign-in");
            let cookie = session_cookie(&result.token.token, result.token.expires_in)?;
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/portal/articles")).into_response())
        }
        Err(err @ (ApplicationError::Unauthorized(_) | ApplicationError::Forbidden(_))) => {
            let status = match &err {
                ApplicationError::Forbidden(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::UNAUTHORIZED,
            };
            let mut context = base_context(None);
            context.insert("username", &username);
            context.insert("error", &Some(err.to_string()));
            Ok((status, page("login.html", &context)?).into_response())
        }
        Err(err) => Err(PortalError::from(err)),
    }
}

pub async fn logout() -> Response {
    ([(SET_COOKIE, cleared_cookie())], Redirect::to("/portal/login")).into_response()
}

// src/presentation/web/error.rs
use super::{templates, views::ViewerView};
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::presentation::http::error::HttpError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;

/// Failure of a portal page. Rendered as HTML, never as JSON.
#[derive(Debug)]
pub enum PortalError {
    /// The page needs a signed-in user.
    LoginRequired,
    Page {
        error: HttpError,
        viewer: Option<ViewerView>,
    },
}

pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Page {
            error: HttpError::new(status, message),
            viewer: None,
        }
    }

    pub fn render_failure(message: String) -> Self {
        tracing::error!(%message, "portal render failed");
        Self::status(StatusCode::INTERNAL_SERVER_ERROR, "the page could not be rendered")
    }

    /// Keeps the navigation bar signed in on the error page.
    pub fn for_viewer(self, viewer: Option<ViewerView>) -> Self {
        match self {
            Self::Page { error, .. } => Self::Page { error, viewer },
            other => other,
        }
    }
}

impl From<ApplicationError> for PortalError {
    fn from(err: ApplicationError) -> Self {
        Self::Page {
            error: HttpError::from_error(err),
            viewer: None,
        }
    }
}

pub trait IntoPortalResult<T> {
    /// Maps an application failure to an error page for `viewer`.
    fn into_page(self, viewer: Option<&ViewerView>) -> PortalResult<T>;
}

impl<T> IntoPortalResult<T> for ApplicationResult<T> {
    fn into_page(self, viewer: Option<&ViewerView>) -> PortalResult<T> {
        self.map_err(|err| PortalError::from(err).for_viewer(viewer.cloned()))
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let (error, viewer) = match self {
            Self::LoginRequired => return Redirect::to("/portal/login").into_response(),
            Self::Page { error, viewer } => (error, viewer),
        };

        let status = error.status();
        let mut context = Context::new();
        context.insert("viewer", &viewer);
        context.insert("status", &status.as_u16());
        context.insert("reason", status.canonical_reason().unwrap_or("Error"));
        context.insert("message", error.message());

        match templates::render("error.html", &context) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(message) => {
                tracing::error!(%message, "error page failed to render");
                (status, error.message().to_string()).into_response()
            }
        }
    }
}

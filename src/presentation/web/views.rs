// src/presentation/web/views.rs
//! Serializable shapes handed to the portal templates.
use super::{
    error::{PortalError, PortalResult},
    templates,
};
use crate::application::{dto::AuthenticatedUser, queries::content::ContentView};
use crate::domain::content::ContentKind;
use axum::response::Html;
use serde::Serialize;
use tera::Context;

#[derive(Debug, Clone, Serialize)]
pub struct ViewerView {
    pub id: i64,
    pub username: String,
    pub role: &'static str,
    pub may_author: bool,
    pub may_review: bool,
}

impl From<&AuthenticatedUser> for ViewerView {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.clone(),
            role: user.role.as_str(),
            may_author: user.may_author(),
            may_review: user.may_review(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionView {
    pub path: &'static str,
    pub label: &'static str,
    pub plural: &'static str,
}

impl From<ContentKind> for CollectionView {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Article => Self {
                path: "/portal/articles",
                label: "Article",
                plural: "Articles",
            },
            ContentKind::Newsletter => Self {
                path: "/portal/newsletters",
                label: "Newsletter",
                plural: "Newsletters",
            },
        }
    }
}

pub fn view_name(view: ContentView) -> &'static str {
    match view {
        ContentView::All => "all",
        ContentView::Subscribed => "subscribed",
    }
}

pub fn base_context(viewer: Option<&ViewerView>) -> Context {
    let mut context = Context::new();
    context.insert("viewer", &viewer);
    context
}

pub fn page(name: &str, context: &Context) -> PortalResult<Html<String>> {
    templates::render(name, context)
        .map(Html)
        .map_err(PortalError::render_failure)
}

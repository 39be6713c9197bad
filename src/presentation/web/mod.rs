// src/presentation/web/mod.rs
//! Server-rendered editorial portal mounted under `/portal`. Pages call the
//! same application services as the JSON API.
pub mod auth;
pub mod content;
pub mod error;
pub mod follows;
pub mod session;
pub mod templates;
pub mod views;

use crate::domain::content::ContentKind;
use crate::presentation::http::routes::with_login_limit;
use axum::{
    Extension, Router,
    response::Redirect,
    routing::{get, post},
};

pub fn router(login_rate_limit: bool) -> Router {
    let login = Router::new().route("/login", get(auth::login_form).post(auth::login));

    Router::new()
        .route("/", get(|| async { Redirect::to("/portal/articles") }))
        .merge(with_login_limit(login, login_rate_limit))
        .route("/logout", post(auth::logout))
        .route("/review", get(content::review_dashboard))
        .nest("/articles", collection_routes(ContentKind::Article))
        .nest("/newsletters", collection_routes(ContentKind::Newsletter))
        .route(
            "/journalists/{id}/follow",
            post(follows::follow_journalist),
        )
        .route(
            "/journalists/{id}/unfollow",
            post(follows::unfollow_journalist),
        )
        .route("/publishers/{id}/follow", post(follows::follow_publisher))
        .route(
            "/publishers/{id}/unfollow",
            post(follows::unfollow_publisher),
        )
}

fn collection_routes(kind: ContentKind) -> Router {
    Router::new()
        .route("/", get(content::list).post(content::create))
        .route("/new", get(content::new_form))
        .route("/{id}", get(content::detail))
        .route("/{id}/approve", post(content::approve))
        .route("/{id}/deny", post(content::deny))
        .route("/{id}/delete", post(content::delete))
        .layer(Extension(kind))
}

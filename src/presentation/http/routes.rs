// src/presentation/http/routes.rs
use crate::domain::content::ContentKind;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, content, journalists, publishers, subscriptions},
    middleware::rate_limit::login_rate_limit_layer,
    openapi::{self, StatusResponse},
};
use crate::presentation::web;
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: HttpState) -> Router {
    let cors = cors_layer(&state.settings.allowed_origins);

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(auth_routes(state.settings.login_rate_limit))
        .route("/api/v1/auth/me", get(auth::me))
        .nest("/api/v1/articles", content_routes(ContentKind::Article))
        .nest(
            "/api/v1/newsletters",
            content_routes(ContentKind::Newsletter),
        )
        .route(
            "/api/v1/publishers",
            get(publishers::list_publishers).post(publishers::create_publisher),
        )
        .route("/api/v1/publishers/{id}", get(publishers::get_publisher))
        .route(
            "/api/v1/publishers/{id}/editors",
            post(publishers::add_editor),
        )
        .route(
            "/api/v1/publishers/{id}/journalists",
            post(publishers::add_journalist),
        )
        .route("/api/v1/journalists", get(journalists::list_journalists))
        .route(
            "/api/v1/subscriptions",
            get(subscriptions::get_subscriptions).put(subscriptions::replace_subscriptions),
        )
        .route(
            "/api/v1/subscriptions/journalists/{id}",
            post(subscriptions::follow_journalist).delete(subscriptions::unfollow_journalist),
        )
        .route(
            "/api/v1/subscriptions/publishers/{id}",
            post(subscriptions::follow_publisher).delete(subscriptions::unfollow_publisher),
        )
        .nest("/portal", web::router(state.settings.login_rate_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

/// Routes of one content collection; handlers read the kind from an extension.
fn content_routes(kind: ContentKind) -> Router {
    Router::new()
        .route(
            "/",
            get(content::list_content).post(content::create_content),
        )
        .route(
            "/{id}",
            get(content::get_content)
                .patch(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/status", post(content::change_status))
        .layer(Extension(kind))
}

fn auth_routes(rate_limited: bool) -> Router {
    let register = Router::new().route("/api/v1/auth/register", post(auth::register));
    let token = Router::new().route("/api/v1/auth/token", post(auth::token));
    register.merge(with_login_limit(token, rate_limited))
}

/// Applies the credential rate limiter when enabled.
pub(crate) fn with_login_limit(router: Router, enabled: bool) -> Router {
    if !enabled {
        return router;
    }
    match login_rate_limit_layer() {
        Some(layer) => router.layer(layer),
        None => {
            warn!("login rate limiter misconfigured; serving without it");
            router
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}

// src/presentation/http/controllers/subscriptions.rs
use crate::application::{
    commands::subscriptions::ReplaceSubscriptionsCommand, dto::SubscriptionsDto,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceSubscriptionsRequest {
    #[serde(default)]
    pub journalists: Vec<i64>,
    #[serde(default)]
    pub publishers: Vec<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    responses(
        (status = 200, description = "Followed journalists and publishers.", body = SubscriptionsDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn get_subscriptions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .user_queries
        .subscriptions(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/subscriptions",
    request_body = ReplaceSubscriptionsRequest,
    responses(
        (status = 200, description = "Subscriptions replaced.", body = SubscriptionsDto),
        (status = 400, description = "Unknown journalist or publisher ids.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn replace_subscriptions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ReplaceSubscriptionsRequest>,
) -> HttpResult<Json<SubscriptionsDto>> {
    let command = ReplaceSubscriptionsCommand {
        journalists: payload.journalists,
        publishers: payload.publishers,
    };
    state
        .services
        .subscription_commands
        .replace_subscriptions(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/journalists/{id}",
    params(("id" = i64, Path, description = "Journalist user id")),
    responses(
        (status = 200, description = "Journalist followed.", body = SubscriptionsDto),
        (status = 404, description = "No such journalist.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn follow_journalist(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .subscription_commands
        .follow_journalist(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/journalists/{id}",
    params(("id" = i64, Path, description = "Journalist user id")),
    responses(
        (status = 200, description = "Journalist unfollowed.", body = SubscriptionsDto),
        (status = 404, description = "No such journalist.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn unfollow_journalist(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .subscription_commands
        .unfollow_journalist(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "Publisher followed.", body = SubscriptionsDto),
        (status = 404, description = "No such publisher.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn follow_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .subscription_commands
        .follow_publisher(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "Publisher unfollowed.", body = SubscriptionsDto),
        (status = 404, description = "No such publisher.", body = ErrorResponse)
    ),
    tag = "Subscriptions"
)]
pub async fn unfollow_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<SubscriptionsDto>> {
    state
        .services
        .subscription_commands
        .unfollow_publisher(&user, id)
        .await
        .into_http()
        .map(Json)
}

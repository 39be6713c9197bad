// src/presentation/http/controllers/content.rs
//! Article and newsletter endpoints. The same handlers serve both
//! collections; the router attaches the collection's `ContentKind`.
use crate::application::{
    commands::content::{
        ChangeStatusCommand, CreateContentCommand, DeleteContentCommand, UpdateContentCommand,
    },
    dto::{ContentDto, CursorPage},
    queries::content::{ContentView, GetContentQuery, ListContentQuery},
};
use crate::domain::content::ContentKind;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentListParams {
    /// `all` (default) or `subscribed`.
    #[serde(default)]
    pub view: Option<String>,
    /// Reviewers only; other callers always get approved items.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContentRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub publisher_id: Option<i64>,
    /// Ignored: new items always start pending.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Omit to keep the current publisher; `null` detaches a newsletter.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>)]
    pub publisher_id: Option<Option<i64>>,
    /// Routed through the approval workflow when it differs from the current status.
    pub status: Option<String>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    /// `pending`, `approved` or `denied`.
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/{collection}",
    params(
        ("collection" = String, Path, description = "`articles` or `newsletters`"),
        ContentListParams
    ),
    responses(
        (status = 200, description = "Newest first, cursor paginated.", body = crate::presentation::http::openapi::ContentListResponse),
        (status = 400, description = "Malformed cursor, view or status.", body = ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Content"
)]
pub async fn list_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    viewer: MaybeAuthenticated,
    Query(params): Query<ContentListParams>,
) -> HttpResult<Json<CursorPage<ContentDto>>> {
    let view = params
        .view
        .as_deref()
        .map(str::parse::<ContentView>)
        .transpose()
        .into_http()?
        .unwrap_or_default();

    let query = ListContentQuery {
        kind,
        view,
        status: params.status,
        cursor: params.cursor,
        limit: params.limit,
    };

    state
        .services
        .content_queries
        .list(viewer.0.as_ref(), query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "`articles` or `newsletters`"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "The item.", body = ContentDto),
        (status = 404, description = "Missing or not visible to the caller.", body = ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Content"
)]
pub async fn get_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    viewer: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ContentDto>> {
    state
        .services
        .content_queries
        .get(viewer.0.as_ref(), GetContentQuery { kind, id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/{collection}",
    params(("collection" = String, Path, description = "`articles` or `newsletters`")),
    request_body = CreateContentRequest,
    responses(
        (status = 201, description = "Created in pending state.", body = ContentDto),
        (status = 400, description = "Invalid fields.", body = ErrorResponse),
        (status = 403, description = "Caller may not author content.", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn create_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateContentRequest>,
) -> HttpResult<(StatusCode, Json<ContentDto>)> {
    let command = CreateContentCommand {
        kind,
        title: payload.title,
        body: payload.body,
        publisher_id: payload.publisher_id,
        status: payload.status,
    };

    let created = state
        .services
        .content_commands
        .create(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "`articles` or `newsletters`"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Updated item.", body = ContentDto),
        (status = 400, description = "Invalid fields.", body = ErrorResponse),
        (status = 403, description = "Not the author, or status change without review rights.", body = ErrorResponse),
        (status = 404, description = "No such item.", body = ErrorResponse),
        (status = 409, description = "Status changed concurrently.", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn update_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContentRequest>,
) -> HttpResult<Json<ContentDto>> {
    let command = UpdateContentCommand {
        kind,
        id,
        title: payload.title,
        body: payload.body,
        publisher_id: payload.publisher_id,
        status: payload.status,
    };

    state
        .services
        .content_commands
        .update(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/{collection}/{id}/status",
    params(
        ("collection" = String, Path, description = "`articles` or `newsletters`"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Item after the transition.", body = ContentDto),
        (status = 400, description = "Unknown status.", body = ErrorResponse),
        (status = 403, description = "Editors only.", body = ErrorResponse),
        (status = 404, description = "No such item.", body = ErrorResponse),
        (status = 409, description = "Status changed concurrently.", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn change_status(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ChangeStatusRequest>,
) -> HttpResult<Json<ContentDto>> {
    let command = ChangeStatusCommand {
        kind,
        id,
        status: payload.status,
    };

    state
        .services
        .content_commands
        .change_status(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/{collection}/{id}",
    params(
        ("collection" = String, Path, description = "`articles` or `newsletters`"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Deleted."),
        (status = 403, description = "Not the author.", body = ErrorResponse),
        (status = 404, description = "No such item.", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn delete_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .content_commands
        .delete(&user, DeleteContentCommand { kind, id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> UpdateContentRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn publisher_null_differs_from_absent() {
        assert_eq!(parse(r#"{"title":"t"}"#).publisher_id, None);
        assert_eq!(parse(r#"{"publisher_id":null}"#).publisher_id, Some(None));
        assert_eq!(parse(r#"{"publisher_id":4}"#).publisher_id, Some(Some(4)));
    }
}

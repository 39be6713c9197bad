// src/presentation/http/controllers/publishers.rs
use crate::application::{
    commands::publishers::{AddStaffCommand, CreatePublisherCommand},
    dto::PublisherDto,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePublisherRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddStaffRequest {
    pub user_id: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers",
    responses((status = 200, description = "All publishers.", body = [PublisherDto])),
    security(()),
    tag = "Publishers"
)]
pub async fn list_publishers(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<PublisherDto>>> {
    state
        .services
        .publisher_queries
        .list_publishers()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/publishers/{id}",
    params(("id" = i64, Path, description = "Publisher id")),
    responses(
        (status = 200, description = "Publisher with its staff.", body = PublisherDto),
        (status = 404, description = "No such publisher.", body = ErrorResponse)
    ),
    security(()),
    tag = "Publishers"
)]
pub async fn get_publisher(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<PublisherDto>> {
    state
        .services
        .publisher_queries
        .get_publisher(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/publishers",
    request_body = CreatePublisherRequest,
    responses(
        (status = 201, description = "Publisher created.", body = PublisherDto),
        (status = 400, description = "Invalid name.", body = ErrorResponse),
        (status = 403, description = "Staff only.", body = ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn create_publisher(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreatePublisherRequest>,
) -> HttpResult<(StatusCode, Json<PublisherDto>)> {
    let command = CreatePublisherCommand {
        name: payload.name,
        description: payload.description,
    };
    let created = state
        .services
        .publisher_commands
        .create_publisher(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/api/v1/publishers/{id}/editors",
    params(("id" = i64, Path, description = "Publisher id")),
    request_body = AddStaffRequest,
    responses(
        (status = 200, description = "Editor added.", body = PublisherDto),
        (status = 400, description = "User is not an editor.", body = ErrorResponse),
        (status = 403, description = "Staff only.", body = ErrorResponse),
        (status = 404, description = "No such publisher.", body = ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn add_editor(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AddStaffRequest>,
) -> HttpResult<Json<PublisherDto>> {
    let command = AddStaffCommand {
        publisher_id: id,
        user_id: payload.user_id,
    };
    state
        .services
        .publisher_commands
        .add_editor(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/publishers/{id}/journalists",
    params(("id" = i64, Path, description = "Publisher id")),
    request_body = AddStaffRequest,
    responses(
        (status = 200, description = "Journalist added.", body = PublisherDto),
        (status = 400, description = "User is not a journalist.", body = ErrorResponse),
        (status = 403, description = "Staff only.", body = ErrorResponse),
        (status = 404, description = "No such publisher.", body = ErrorResponse)
    ),
    tag = "Publishers"
)]
pub async fn add_journalist(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AddStaffRequest>,
) -> HttpResult<Json<PublisherDto>> {
    let command = AddStaffCommand {
        publisher_id: id,
        user_id: payload.user_id,
    };
    state
        .services
        .publisher_commands
        .add_journalist(&user, command)
        .await
        .into_http()
        .map(Json)
}

// src/presentation/http/openapi.rs
use crate::application::dto::ContentDto;
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Schema of a `CursorPage` of content items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentListResponse {
    pub items: Vec<ContentDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::token,
        crate::presentation::http::controllers::auth::me,
        crate::presentation::http::controllers::content::list_content,
        crate::presentation::http::controllers::content::get_content,
        crate::presentation::http::controllers::content::create_content,
        crate::presentation::http::controllers::content::update_content,
        crate::presentation::http::controllers::content::change_status,
        crate::presentation::http::controllers::content::delete_content,
        crate::presentation::http::controllers::publishers::list_publishers,
        crate::presentation::http::controllers::publishers::get_publisher,
        crate::presentation::http::controllers::publishers::create_publisher,
        crate::presentation::http::controllers::publishers::add_editor,
        crate::presentation::http::controllers::publishers::add_journalist,
        crate::presentation::http::controllers::journalists::list_journalists,
        crate::presentation::http::controllers::subscriptions::get_subscriptions,
        crate::presentation::http::controllers::subscriptions::replace_subscriptions,
        crate::presentation::http::controllers::subscriptions::follow_journalist,
        crate::presentation::http::controllers::subscriptions::unfollow_journalist,
        crate::presentation::http::controllers::subscriptions::follow_publisher,
        crate::presentation::http::controllers::subscriptions::unfollow_publisher,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            ContentListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::TokenRequest,
            crate::presentation::http::controllers::auth::TokenResponse,
            crate::presentation::http::controllers::content::CreateContentRequest,
            crate::presentation::http::controllers::content::UpdateContentRequest,
            crate::presentation::http::controllers::content::ChangeStatusRequest,
            crate::presentation::http::controllers::publishers::CreatePublisherRequest,
            crate::presentation::http::controllers::publishers::AddStaffRequest,
            crate::presentation::http::controllers::subscriptions::ReplaceSubscriptionsRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::JournalistDto,
            crate::application::dto::PublisherDto,
            crate::application::dto::SubscriptionsDto,
            crate::application::dto::ContentDto
        )
    ),
    tags(
        (name = "Auth", description = "Registration and bearer tokens"),
        (name = "Users", description = "Journalist directory"),
        (name = "Content", description = "Articles and newsletters with editorial approval"),
        (name = "Publishers", description = "Publishers and their staff"),
        (name = "Subscriptions", description = "Followed journalists and publishers"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "News Portal API",
        description = "Articles and newsletters with editorial approval and subscriber notifications",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::temporary("/portal") }))
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

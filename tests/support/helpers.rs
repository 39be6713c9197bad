// tests/support/helpers.rs
use super::mocks::{
    FixedClock, InMemoryStore, PlainPasswordHasher, RecordingBroadcaster, RecordingMailer,
    StaticTokenManager,
};
use axum::body::{self, Body};
use axum::http::{Request, Response, header};
use news_portal::application::{
    notifications::{DispatchMode, NotificationSettings},
    ports::notification::{Broadcaster, Mailer},
    services::{Adapters, ApplicationServices, Repositories},
};
use news_portal::domain::content::ContentWriteRepository;
use news_portal::presentation::http::{
    routes::build_router,
    state::{HttpState, RouterSettings},
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const PASSWORD: &str = "correct horse";
pub const FROM_EMAIL: &str = "desk@newsportal.test";

/// Application services wired to in-memory adapters, notifying inline so a
/// test observes the fan-out as soon as the command returns.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub broadcaster: Arc<RecordingBroadcaster>,
    pub clock: Arc<FixedClock>,
}

#[derive(Default)]
pub struct TestAppBuilder {
    mailer: Option<Arc<dyn Mailer>>,
    broadcaster: Option<Arc<dyn Broadcaster>>,
    content_write: Option<Arc<dyn ContentWriteRepository>>,
    mode: Option<DispatchMode>,
    timeout: Option<Duration>,
}

impl TestAppBuilder {
    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn broadcaster(mut self, broadcaster: Arc<dyn Broadcaster>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    /// Defaults to `Inline`.
    pub fn mode(mut self, mode: DispatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn notification_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the content writer, e.g. with a wrapper around `store`.
    pub fn content_write(mut self, writer: Arc<dyn ContentWriteRepository>) -> Self {
        self.content_write = Some(writer);
        self
    }

    pub fn build_with_store(self, store: Arc<InMemoryStore>) -> TestApp {
        let recording = Arc::new(RecordingMailer::default());
        let broadcaster = Arc::new(RecordingBroadcaster::default());
        let clock = Arc::new(FixedClock::new());

        let repos = Repositories {
            users: store.clone(),
            publishers: store.clone(),
            subscriptions: store.clone(),
            content_write: self
                .content_write
                .unwrap_or_else(|| store.clone() as Arc<dyn ContentWriteRepository>),
            content_read: store.clone(),
        };
        let adapters = Adapters {
            password_hasher: Arc::new(PlainPasswordHasher),
            token_manager: Arc::new(StaticTokenManager::default()),
            clock: clock.clone(),
            mailer: self
                .mailer
                .unwrap_or_else(|| recording.clone() as Arc<dyn Mailer>),
            broadcaster: self
                .broadcaster
                .unwrap_or_else(|| broadcaster.clone() as Arc<dyn Broadcaster>),
        };
        let settings = NotificationSettings {
            from_email: FROM_EMAIL.into(),
            mode: self.mode.unwrap_or(DispatchMode::Inline),
            timeout: self.timeout.unwrap_or(Duration::from_secs(5)),
        };

        TestApp {
            services: Arc::new(ApplicationServices::new(repos, adapters, settings)),
            store,
            mailer: recording,
            broadcaster,
            clock,
        }
    }

    pub fn build(self) -> TestApp {
        self.build_with_store(Arc::new(InMemoryStore::new()))
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState::new(
            Arc::clone(&self.services),
            RouterSettings {
                allowed_origins: Vec::new(),
                login_rate_limit: false,
            },
        );
        build_router(state)
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn form_request(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub fn page_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Router-level switches taken from configuration.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub allowed_origins: Vec<String>,
    pub login_rate_limit: bool,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            login_rate_limit: true,
        }
    }
}

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: Arc<RouterSettings>,
}

impl HttpState {
    pub fn new(services: Arc<ApplicationServices>, settings: RouterSettings) -> Self {
        Self {
            services,
            settings: Arc::new(settings),
        }
    }
}

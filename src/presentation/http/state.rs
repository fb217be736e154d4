// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Knobs the HTTP layer applies on top of the application services.
#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub max_page_size: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_page_size: 1000,
            allowed_origins: vec!["http://localhost:5173".into()],
        }
    }
}

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: Arc<HttpSettings>,
}

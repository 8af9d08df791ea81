//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Application state cloned into each request.
///
/// The repository (and with it the connection pool) is owned by the service;
/// there is no process-wide storage handle.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
}

impl AppState {
    /// Builds the state around `repository`, issuing short links under `base_url`.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, base_url)),
        }
    }
}

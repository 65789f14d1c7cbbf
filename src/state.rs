use crate::config::Config;
use crate::content::ContentCatalog;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ContentCatalog>,
    pub config: Arc<Config>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: ContentCatalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }
}

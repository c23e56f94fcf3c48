//! Application state shared across handlers.

use glyphpress_core::config::AppConfig;
use glyphpress_subset::UploadPipeline;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Upload pipeline shared by all requests.
    pub pipeline: Arc<UploadPipeline>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, pipeline: Arc<UploadPipeline>) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }
}

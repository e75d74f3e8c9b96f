//! Shared state handed to every handler.

use crate::{config::settings::AppConfig, web::render::Renderer};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Store connection, renderer and the settings handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool; cloning shares the pool
    pub db: DatabaseConnection,
    /// Turns a template name and context into a response body
    pub renderer: Arc<dyn Renderer>,
    /// Number of work logs listed on the work log page
    pub recent_limit: u64,
}

impl AppState {
    /// Builds state from a connection, a renderer and the loaded settings.
    #[must_use]
    pub fn new(db: DatabaseConnection, renderer: Arc<dyn Renderer>, config: &AppConfig) -> Self {
        Self {
            db,
            renderer,
            recent_limit: config.recent_limit,
        }
    }
}

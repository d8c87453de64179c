use std::sync::Arc;

use posty_ai::{ImageGenerator, TextGenerator};
use posty_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything beyond the pool sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: posty_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Idea, draft, and rewrite backend.
    pub text_generator: Arc<dyn TextGenerator>,
    /// Image backend.
    pub image_generator: Arc<dyn ImageGenerator>,
    /// Where generated images are uploaded.
    pub object_store: Arc<dyn ObjectStore>,
}

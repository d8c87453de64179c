//! Route definitions for idea-scoped resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{draft, idea, image};
use crate::state::AppState;

/// Routes mounted at `/ideas`.
///
/// ```text
/// PUT    /{id}           -> update
/// DELETE /{id}           -> archive
/// POST   /{id}/image     -> image::generate
/// GET    /{id}/draft     -> draft::get
/// PUT    /{id}/draft     -> draft::save
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(idea::update).delete(idea::archive))
        .route("/{id}/image", post(image::generate))
        .route("/{id}/draft", get(draft::get).put(draft::save))
}

use axum::routing::post;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// POST /generate     -> generate
/// POST /rewrite      -> rewrite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(content::generate))
        .route("/rewrite", post(content::rewrite))
}

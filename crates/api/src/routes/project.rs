//! Route definitions for projects and their ideas.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{idea, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
///
/// GET    /{id}/ideas              -> idea::list_by_project
/// POST   /{id}/ideas              -> idea::create
/// POST   /{id}/ideas/generate     -> idea::generate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/ideas",
            get(idea::list_by_project).post(idea::create),
        )
        .route("/{id}/ideas/generate", post(idea::generate))
}

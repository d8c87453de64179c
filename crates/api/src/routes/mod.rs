pub mod content;
pub mod health;
pub mod idea;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// ```text
/// /projects                          list, create
/// /projects/{id}                     get, update, delete
/// /projects/{id}/ideas               list, create
/// /projects/{id}/ideas/generate      generate (POST)
///
/// /ideas/{id}                        update (PUT), archive (DELETE)
/// /ideas/{id}/image                  generate image (POST)
/// /ideas/{id}/draft                  get, save (PUT)
///
/// /content/generate                  generate draft (POST)
/// /content/rewrite                   rewrite text (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/ideas", idea::router())
        .nest("/content", content::router())
}

//! Owner checks shared by handlers.
//!
//! A resource that does not exist and one owned by another user are
//! indistinguishable to the caller: both resolve to `NotFound`.

use posty_core::error::CoreError;
use posty_core::types::DbId;
use posty_db::models::idea::Idea;
use posty_db::models::project::Project;
use posty_db::repositories::{IdeaRepo, ProjectRepo};
use posty_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a project owned by `user_id` or fail with 404.
pub async fn ensure_project_owned(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, project_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Load an idea owned by `user_id` or fail with 404.
pub async fn ensure_idea_owned(pool: &DbPool, idea_id: DbId, user_id: DbId) -> AppResult<Idea> {
    IdeaRepo::find_by_id(pool, idea_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }))
}

/// Move an idea to `content_generated` if it is still `new`.
///
/// Conditional update: a concurrent explicit status change wins.
pub async fn mark_content_generated(pool: &DbPool, idea: &Idea, user_id: DbId) -> AppResult<()> {
    if let Some(next) = idea.status.after_draft() {
        let applied = IdeaRepo::transition(pool, idea.id, user_id, idea.status, next).await?;
        if applied {
            tracing::info!(idea_id = %idea.id, status = %next, "Idea status advanced");
        }
    }
    Ok(())
}

//! Repository for the `drafts` table.

use posty_core::types::DbId;
use sqlx::PgPool;

use crate::models::draft::Draft;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, idea_id, project_id, user_id, content, created_at, updated_at";

/// Provides owner-scoped operations for drafts.
pub struct DraftRepo;

impl DraftRepo {
    /// Find the draft for an idea. Returns `None` when there is no draft
    /// or the idea is not owned by `user_id`.
    pub async fn find_by_idea(
        pool: &PgPool,
        idea_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM drafts WHERE idea_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Draft>(&query)
            .bind(idea_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the draft for an idea in one statement.
    ///
    /// Uses `ON CONFLICT (idea_id) DO UPDATE` so concurrent saves can never
    /// produce two drafts for the same idea; the last write wins. The new
    /// row copies `project_id` from the idea. Returns `None` (and writes
    /// nothing) when the idea is not owned by `user_id`.
    pub async fn upsert(
        pool: &PgPool,
        idea_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let query = format!(
            "INSERT INTO drafts (idea_id, project_id, user_id, content)
             SELECT i.id, i.project_id, i.user_id, $3
             FROM ideas i
             WHERE i.id = $1 AND i.user_id = $2
             ON CONFLICT (idea_id) DO UPDATE
             SET content = EXCLUDED.content
             WHERE drafts.user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Draft>(&query)
            .bind(idea_id)
            .bind(user_id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `ideas` table.
//!
//! Ideas are never physically deleted here; "delete" is [`IdeaRepo::archive`].
//! Mutations on ideas the caller does not own affect zero rows and report
//! `false` instead of failing.

use posty_core::idea::IdeaStatus;
use posty_core::types::DbId;
use sqlx::PgPool;

use crate::models::idea::{Idea, UpdateIdea};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, project_id, idea_text, status, image_url, created_at, updated_at";

/// Provides owner-scoped operations for ideas.
pub struct IdeaRepo;

impl IdeaRepo {
    /// List a project's ideas, newest first. Empty when none match.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas
             WHERE project_id = $1 AND user_id = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List a project's non-archived ideas, newest first.
    pub async fn list_active_by_project(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<Idea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ideas
             WHERE project_id = $1 AND user_id = $2 AND status <> $3
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(IdeaStatus::Archived.as_str())
            .fetch_all(pool)
            .await
    }

    /// Find an idea by id. Returns `None` when absent or owned by someone else.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ideas WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Idea>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert one idea with status `new`.
    ///
    /// Returns `None` (and inserts nothing) unless `project_id` is owned by
    /// `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        idea_text: &str,
    ) -> Result<Option<Idea>, sqlx::Error> {
        let query = format!(
            "INSERT INTO ideas (user_id, project_id, idea_text)
             SELECT p.user_id, p.id, $3
             FROM projects p
             WHERE p.id = $2 AND p.user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(idea_text)
            .fetch_optional(pool)
            .await
    }

    /// Insert a batch of ideas with status `new` in a single statement.
    ///
    /// Either every text is inserted or none is. Returns an empty vector
    /// when the project is not owned by `user_id`.
    ///
    /// Rows are returned, and later listed, in the order of `idea_texts`.
    pub async fn create_batch(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        idea_texts: &[String],
    ) -> Result<Vec<Idea>, sqlx::Error> {
        // NOW() is fixed per transaction; step each row back by its
        // position so newest-first listing matches the input order.
        let query = format!(
            "WITH inserted AS (
                 INSERT INTO ideas (user_id, project_id, idea_text, created_at, updated_at)
                 SELECT p.user_id, p.id, t.idea_text,
                        NOW() - t.ord::float8 * INTERVAL '1 microsecond',
                        NOW() - t.ord::float8 * INTERVAL '1 microsecond'
                 FROM projects p
                 CROSS JOIN UNNEST($3::text[]) WITH ORDINALITY AS t(idea_text, ord)
                 WHERE p.id = $2 AND p.user_id = $1
                 RETURNING {COLUMNS}
             )
             SELECT {COLUMNS} FROM inserted ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Idea>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(idea_texts)
            .fetch_all(pool)
            .await
    }

    /// Apply a text and/or status edit. Returns `true` if a row was updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateIdea,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ideas SET
                idea_text = COALESCE($3, idea_text),
                status = COALESCE($4, status)
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.idea_text)
        .bind(input.status.map(|s| s.as_str()))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move an idea to `archived`. Returns `true` if a row was updated.
    pub async fn archive(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE ideas SET status = $3 WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .bind(IdeaStatus::Archived.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Compare-and-set the status: only updates while the idea is still in `from`.
    ///
    /// Returns `true` if the transition was applied.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        from: IdeaStatus,
        to: IdeaStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ideas SET status = $4 WHERE id = $1 AND user_id = $2 AND status = $3",
        )
        .bind(id)
        .bind(user_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the idea's image URL. Returns `true` if a row was updated.
    pub async fn set_image_url(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        image_url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE ideas SET image_url = $3 WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .bind(image_url)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

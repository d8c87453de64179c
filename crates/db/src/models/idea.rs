//! Idea entity model and DTOs.

use posty_core::idea::IdeaStatus;
use posty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An idea row from the `ideas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Idea {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub idea_text: String,
    #[sqlx(try_from = "String")]
    pub status: IdeaStatus,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating an idea. At least one field should be set.
#[derive(Debug, Clone, Default)]
pub struct UpdateIdea {
    pub idea_text: Option<String>,
    pub status: Option<IdeaStatus>,
}

//! Draft entity model.

use posty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A draft row from the `drafts` table. At most one per idea.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Draft {
    pub id: DbId,
    pub idea_id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

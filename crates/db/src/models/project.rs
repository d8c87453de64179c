//! Project entity model and DTOs.

use posty_core::project::{Platform, ProjectContext};
use posty_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    #[sqlx(try_from = "String")]
    pub platform: Platform,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The persona fields that parameterize generation prompts.
    pub fn context(&self) -> ProjectContext {
        ProjectContext {
            name: self.name.clone(),
            niche: self.niche.clone(),
            description: self.description.clone(),
            tone: self.tone.clone(),
            platform: self.platform,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub platform: Platform,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub platform: Option<Platform>,
}

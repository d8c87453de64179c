//! Project personas: target platform, project context, and validation.
//!
//! A project parameterizes every generation prompt. The platform decides
//! the phrasing guidance used for drafts; the remaining free-text fields
//! are passed to the model verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a project name in characters.
pub const MAX_PROJECT_NAME_LENGTH: usize = 200;

/// Maximum length for the free-text niche/tone/description fields.
pub const MAX_PROJECT_FIELD_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Social platform a project publishes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Twitter,
    Linkedin,
    Telegram,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Linkedin, Platform::Telegram];

    /// The value stored in the `projects.platform` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Telegram => "telegram",
        }
    }

    /// Phrasing guidance appended to draft prompts for this platform.
    pub fn draft_guidance(self) -> &'static str {
        match self {
            Platform::Twitter => {
                "Create an engaging Twitter thread that naturally flows from one point to the next. \
                 Start with a hook that grabs attention, then share your insights in a conversational way. \
                 End with something that encourages engagement. Keep it casual and easy to read."
            }
            Platform::Linkedin => {
                "Write a professional but engaging LinkedIn post. Share valuable insights that your \
                 audience can learn from. Make it personal and authentic while maintaining a \
                 business-appropriate tone."
            }
            Platform::Telegram => {
                "Create a friendly, conversational Telegram post. Share interesting insights in a \
                 casual way that feels like you're talking directly to your audience."
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Platform::Twitter),
            "linkedin" => Ok(Platform::Linkedin),
            "telegram" => Ok(Platform::Telegram),
            other => Err(CoreError::Validation(format!(
                "Invalid platform '{other}'. Must be one of: twitter, linkedin, telegram"
            ))),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Project context
// ---------------------------------------------------------------------------

/// The persona fields of a project that feed generation prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub platform: Platform,
}

impl ProjectContext {
    /// Copy of this context targeting a different platform.
    pub fn with_platform(&self, platform: Platform) -> Self {
        Self {
            platform,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a project name: non-blank and within the length limit.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name exceeds maximum length of {MAX_PROJECT_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional free-text project field (niche, tone, description).
pub fn validate_project_field(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > MAX_PROJECT_FIELD_LENGTH => {
            Err(CoreError::Validation(format!(
                "Project {field} exceeds maximum length of {MAX_PROJECT_FIELD_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

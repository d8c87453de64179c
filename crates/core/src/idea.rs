//! Idea lifecycle: status values, transition policy, and request validation.
//!
//! Status ordering (`new -> content_generated -> ready -> posted -> archived`)
//! is a display convention only. Any status may be set directly by its
//! owner; the only automatic transition is `new -> content_generated` when
//! the idea first gets a draft.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of ideas requested from the model per generation call.
pub const IDEAS_PER_BATCH: usize = 5;

/// Generated ideas at or above this many characters are discarded.
pub const GENERATED_IDEA_MAX_CHARS: usize = 200;

/// Maximum length of a manually entered idea in characters.
pub const MAX_IDEA_TEXT_LENGTH: usize = 1_000;

/// Leading list markers the model sometimes emits despite the schema
/// (`1.`, `2)`, `-`, `*`, `•`).
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").expect("valid regex"));

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an idea, stored as text in `ideas.status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    #[default]
    New,
    ContentGenerated,
    Ready,
    Posted,
    Archived,
}

impl IdeaStatus {
    /// All statuses in display order.
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::New,
        IdeaStatus::ContentGenerated,
        IdeaStatus::Ready,
        IdeaStatus::Posted,
        IdeaStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IdeaStatus::New => "new",
            IdeaStatus::ContentGenerated => "content_generated",
            IdeaStatus::Ready => "ready",
            IdeaStatus::Posted => "posted",
            IdeaStatus::Archived => "archived",
        }
    }

    /// Status an idea should move to once a draft exists for it.
    ///
    /// Returns `None` when no transition applies (anything past `new`).
    pub fn after_draft(self) -> Option<IdeaStatus> {
        match self {
            IdeaStatus::New => Some(IdeaStatus::ContentGenerated),
            _ => None,
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdeaStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: new, content_generated, ready, posted, archived"
                ))
            })
    }
}

impl TryFrom<String> for IdeaStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Validate idea text: non-blank and within the length limit.
pub fn validate_idea_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Idea text must not be empty".to_string(),
        ));
    }
    if text.chars().count() > MAX_IDEA_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Idea text exceeds maximum length of {MAX_IDEA_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// A validated idea edit. At least one field is always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaChange {
    pub idea_text: Option<String>,
    pub status: Option<IdeaStatus>,
}

/// Validate a raw idea update request.
///
/// Rejects a request carrying neither field with [`CoreError::MissingFields`],
/// blank text, and any status outside the enum.
pub fn validate_idea_change(
    idea_text: Option<&str>,
    status: Option<&str>,
) -> Result<IdeaChange, CoreError> {
    if idea_text.is_none() && status.is_none() {
        return Err(CoreError::MissingFields(
            "at least one of idea_text or status is required".to_string(),
        ));
    }

    if let Some(text) = idea_text {
        validate_idea_text(text)?;
    }
    let status = status.map(IdeaStatus::from_str).transpose()?;

    Ok(IdeaChange {
        idea_text: idea_text.map(|t| t.trim().to_string()),
        status,
    })
}

// ---------------------------------------------------------------------------
// Generated ideas
// ---------------------------------------------------------------------------

/// An existing idea as shown to the model when asking for fresh ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviousIdea {
    pub idea_text: String,
    pub status: IdeaStatus,
}

/// Filter raw model output down to usable, distinct ideas.
///
/// Strips list markers, trims, drops empty or overlong entries, and drops
/// case-insensitive duplicates of each other and of `previous`. At most
/// [`IDEAS_PER_BATCH`] ideas are returned, in model order.
pub fn sanitize_generated_ideas(raw: &[String], previous: &[PreviousIdea]) -> Vec<String> {
    let mut seen: HashSet<String> = previous
        .iter()
        .map(|p| normalize_for_dedup(&p.idea_text))
        .collect();

    raw.iter()
        .map(|line| LIST_MARKER_RE.replace(line, "").trim().to_string())
        .filter(|idea| !idea.is_empty() && idea.chars().count() < GENERATED_IDEA_MAX_CHARS)
        .filter(|idea| seen.insert(normalize_for_dedup(idea)))
        .take(IDEAS_PER_BATCH)
        .collect()
}

fn normalize_for_dedup(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

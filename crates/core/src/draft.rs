//! Draft content validation.

use crate::error::CoreError;

/// Maximum length of saved draft content in characters.
pub const MAX_DRAFT_CONTENT_LENGTH: usize = 20_000;

/// Validate draft content: non-blank and within the length limit.
pub fn validate_draft_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Draft content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_DRAFT_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Draft content exceeds maximum length of {MAX_DRAFT_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

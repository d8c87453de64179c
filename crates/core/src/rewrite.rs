//! Rewrite actions applied to existing draft text.
//!
//! The action set is closed. Only [`RewriteAction::Custom`] carries data:
//! the free-text instruction supplied by the user.

use crate::error::CoreError;

/// Maximum length of a custom rewrite instruction in characters.
pub const MAX_CUSTOM_PROMPT_LENGTH: usize = 2_000;

/// Maximum length of text accepted for rewriting in characters.
pub const MAX_REWRITE_TEXT_LENGTH: usize = 20_000;

/// Action names accepted on the wire, in menu order.
pub const VALID_ACTIONS: &[&str] = &[
    "shorten",
    "expand",
    "fix",
    "custom",
    "professional",
    "empathetic",
    "casual",
    "neutral",
    "educational",
];

/// A text transformation requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteAction {
    Shorten,
    Expand,
    Fix,
    Custom(String),
    Professional,
    Empathetic,
    Casual,
    Neutral,
    Educational,
}

impl RewriteAction {
    /// Parse a wire action name plus its optional instruction.
    ///
    /// `prompt` is required (and must be non-blank) for `custom` and ignored
    /// for every other action.
    pub fn parse(action: &str, prompt: Option<&str>) -> Result<Self, CoreError> {
        let parsed = match action {
            "shorten" => RewriteAction::Shorten,
            "expand" => RewriteAction::Expand,
            "fix" => RewriteAction::Fix,
            "professional" => RewriteAction::Professional,
            "empathetic" => RewriteAction::Empathetic,
            "casual" => RewriteAction::Casual,
            "neutral" => RewriteAction::Neutral,
            "educational" => RewriteAction::Educational,
            "custom" => {
                let instruction = prompt.map(str::trim).unwrap_or_default();
                if instruction.is_empty() {
                    return Err(CoreError::Validation(
                        "A non-empty prompt is required for the custom action".to_string(),
                    ));
                }
                if instruction.chars().count() > MAX_CUSTOM_PROMPT_LENGTH {
                    return Err(CoreError::Validation(format!(
                        "Custom prompt exceeds maximum length of {MAX_CUSTOM_PROMPT_LENGTH} characters"
                    )));
                }
                RewriteAction::Custom(instruction.to_string())
            }
            other => {
                return Err(CoreError::Validation(format!(
                    "Invalid action '{other}'. Must be one of: {}",
                    VALID_ACTIONS.join(", ")
                )))
            }
        };
        Ok(parsed)
    }

    /// Wire name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            RewriteAction::Shorten => "shorten",
            RewriteAction::Expand => "expand",
            RewriteAction::Fix => "fix",
            RewriteAction::Custom(_) => "custom",
            RewriteAction::Professional => "professional",
            RewriteAction::Empathetic => "empathetic",
            RewriteAction::Casual => "casual",
            RewriteAction::Neutral => "neutral",
            RewriteAction::Educational => "educational",
        }
    }

    /// Build the model input for applying this action to `text`.
    pub fn build_prompt(&self, text: &str) -> String {
        match self {
            RewriteAction::Shorten => {
                format!("Shorten the following text while keeping its original meaning:\n\n{text}")
            }
            RewriteAction::Expand => format!(
                "Expand the following text with more detail while keeping its original meaning:\n\n{text}"
            ),
            RewriteAction::Fix => format!(
                "Fix any grammar or spelling mistakes in the following text without changing its meaning:\n\n{text}"
            ),
            RewriteAction::Custom(instruction) => format!(
                "Rewrite the following text according to this instruction: {instruction}\n\n\
                 Return only the rewritten text.\n\n{text}"
            ),
            RewriteAction::Professional
            | RewriteAction::Empathetic
            | RewriteAction::Casual
            | RewriteAction::Neutral
            | RewriteAction::Educational => format!(
                "Rewrite the following text in {} {} tone:\n\n{text}",
                article_for(self.name()),
                self.name()
            ),
        }
    }
}

fn article_for(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Validate text submitted for rewriting: non-blank and within the limit.
pub fn validate_rewrite_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Text to rewrite must not be empty".to_string(),
        ));
    }
    if text.chars().count() > MAX_REWRITE_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Text to rewrite exceeds maximum length of {MAX_REWRITE_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

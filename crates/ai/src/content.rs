//! Content operations built on the generator traits.
//!
//! Each function builds its prompt, calls the backend once, and maps any
//! failure (transport, API status, empty or unusable output) to the
//! operation's own error variant. Nothing here retries.

use posty_core::idea::{sanitize_generated_ideas, PreviousIdea};
use posty_core::project::ProjectContext;
use posty_core::prompts::{
    build_draft_prompt, build_ideas_prompt, build_image_prompt, ideas_schema, DRAFT_INSTRUCTIONS,
    IDEAS_INSTRUCTIONS, REWRITE_INSTRUCTIONS,
};
use posty_core::rewrite::RewriteAction;
use serde::Deserialize;

use crate::error::AiError;
use crate::generator::{CompletionRequest, GeneratedImage, ImageGenerator, TextGenerator, TextTask};

#[derive(Debug, Deserialize)]
struct IdeasPayload {
    ideas: Vec<String>,
}

/// Ask for a fresh batch of ideas and keep only the usable ones.
///
/// Returns at most five distinct idea texts. Fails with
/// [`AiError::GenerationFailed`] when the call fails or nothing usable
/// comes back.
pub async fn generate_ideas(
    generator: &dyn TextGenerator,
    project: &ProjectContext,
    previous: &[PreviousIdea],
) -> Result<Vec<String>, AiError> {
    let request = CompletionRequest {
        task: TextTask::Ideas,
        instructions: IDEAS_INSTRUCTIONS.to_string(),
        prompt: build_ideas_prompt(project, previous),
        json_schema: Some(ideas_schema()),
    };

    let raw = generator.complete(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "Idea generation call failed");
        AiError::GenerationFailed(e.to_string())
    })?;

    let candidates = parse_idea_lines(&raw)?;
    let ideas = sanitize_generated_ideas(&candidates, previous);
    if ideas.is_empty() {
        tracing::warn!(returned = candidates.len(), "No usable ideas in model output");
        return Err(AiError::GenerationFailed(
            "No usable ideas were generated".to_string(),
        ));
    }

    tracing::info!(count = ideas.len(), "Generated ideas");
    Ok(ideas)
}

/// Extract candidate ideas from the model output.
///
/// Expects `{"ideas": [..]}`. Plain text (the backend ignored the schema)
/// is read as one idea per line. Output that looks like JSON but does not
/// match the schema is rejected.
fn parse_idea_lines(raw: &str) -> Result<Vec<String>, AiError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return Ok(raw.lines().map(str::to_string).collect());
    }

    serde_json::from_str::<IdeasPayload>(trimmed)
        .map(|payload| payload.ideas)
        .map_err(|e| {
            tracing::warn!(error = %e, "Idea output does not match the schema");
            AiError::GenerationFailed(format!("Malformed ideas payload: {e}"))
        })
}

/// Expand one idea into a ready-to-post draft for the project's platform.
pub async fn generate_draft(
    generator: &dyn TextGenerator,
    idea_text: &str,
    project: &ProjectContext,
) -> Result<String, AiError> {
    let request = CompletionRequest {
        task: TextTask::Draft,
        instructions: DRAFT_INSTRUCTIONS.to_string(),
        prompt: build_draft_prompt(idea_text, project),
        json_schema: None,
    };

    let content = generator.complete(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "Draft generation call failed");
        AiError::GenerationFailed(e.to_string())
    })?;

    let content = content.trim();
    if content.is_empty() {
        return Err(AiError::GenerationFailed(
            "Model returned an empty draft".to_string(),
        ));
    }
    Ok(content.to_string())
}

/// Apply a rewrite action to `text`. Nothing is persisted.
pub async fn rewrite(
    generator: &dyn TextGenerator,
    action: &RewriteAction,
    text: &str,
) -> Result<String, AiError> {
    let request = CompletionRequest {
        task: TextTask::Rewrite,
        instructions: REWRITE_INSTRUCTIONS.to_string(),
        prompt: action.build_prompt(text),
        json_schema: None,
    };

    let rewritten = generator.complete(&request).await.map_err(|e| {
        tracing::warn!(error = %e, action = action.name(), "Rewrite call failed");
        AiError::RewriteFailed(e.to_string())
    })?;

    let rewritten = rewritten.trim();
    if rewritten.is_empty() {
        return Err(AiError::RewriteFailed(
            "Model returned empty text".to_string(),
        ));
    }
    Ok(rewritten.to_string())
}

/// Illustrate an idea and its draft.
pub async fn generate_image(
    generator: &dyn ImageGenerator,
    idea_text: &str,
    draft_content: &str,
    project: &ProjectContext,
) -> Result<GeneratedImage, AiError> {
    let prompt = build_image_prompt(idea_text, draft_content, project);

    let image = generator.generate(&prompt).await.map_err(|e| {
        tracing::warn!(error = %e, "Image generation call failed");
        AiError::ImageGenerationFailed(e.to_string())
    })?;

    match &image {
        GeneratedImage::Bytes { data, .. } if data.is_empty() => Err(
            AiError::ImageGenerationFailed("Backend returned an empty image".to_string()),
        ),
        GeneratedImage::Url(url) if url.trim().is_empty() => Err(
            AiError::ImageGenerationFailed("Backend returned an empty image URL".to_string()),
        ),
        _ => Ok(image),
    }
}

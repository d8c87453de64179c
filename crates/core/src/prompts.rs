//! Prompt construction for idea, draft, and image generation.
//!
//! Pure string builders; the AI crate sends the results upstream.

use crate::idea::{PreviousIdea, IDEAS_PER_BATCH};
use crate::project::ProjectContext;

/// System instructions for idea generation.
pub const IDEAS_INSTRUCTIONS: &str = "You are a creative strategist generating fresh one-line \
     content ideas tailored to the provided project context.";

/// System instructions for draft generation.
pub const DRAFT_INSTRUCTIONS: &str = "You generate platform-native content based on a one-line \
     idea and project context. Never include source links or citations in your output.";

/// System instructions for rewrites.
pub const REWRITE_INSTRUCTIONS: &str = "You rewrite content based on a provided action. \
     Return only the rewritten text, without commentary, markdown fences, or quotes.";

/// Placeholder used for absent optional project fields.
const UNSET: &str = "-";

fn or_unset(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNSET)
}

/// JSON schema constraining the idea-generation response to `{"ideas": [..]}`.
pub fn ideas_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "ideas": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "additionalProperties": false,
        "required": ["ideas"]
    })
}

/// Build the user prompt asking for a fresh batch of ideas.
///
/// `previous` should already exclude archived ideas.
pub fn build_ideas_prompt(project: &ProjectContext, previous: &[PreviousIdea]) -> String {
    let previous_json = serde_json::to_string(previous).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Generate {IDEAS_PER_BATCH} new one-line content ideas for this project. \
         Each idea must match the tone and fit the target platform.\n\
         Do NOT repeat or closely paraphrase any idea from the previous ideas.\n\
         Return valid JSON: {{\"ideas\": [\"idea1\", \"idea2\", ...]}}\n\
         CRITICAL: No source links, URLs, or citations. Present information as your own \
         knowledge without referencing sources.\n\n\
         Project:\n  \
         name (social media page name, could be a brand name, company name, or a person's name): {name}\n  \
         niche: {niche}\n  \
         description: {description}\n  \
         tone: {tone}\n  \
         platform: {platform}\n\n\
         Previous ideas: {previous_json}\n",
        name = project.name,
        niche = or_unset(&project.niche),
        description = or_unset(&project.description),
        tone = or_unset(&project.tone),
        platform = project.platform,
    )
}

/// Build the user prompt expanding one idea into a ready-to-post draft.
pub fn build_draft_prompt(idea_text: &str, project: &ProjectContext) -> String {
    format!(
        "You are a professional content writer creating a {platform} post.\n\n\
         Project Info:\n\
         - Name: {name}\n\
         - Niche: {niche}\n\
         - Description: {description}\n\
         - Tone: {tone}\n\n\
         Idea: \"{idea_text}\"\n\n\
         {guidance}\n\n\
         Important: Write the post in the same language as the idea provided above. \
         Detect the language of the idea and mirror it; do not translate.\n\n\
         Generate a single draft post based on this idea. Match the tone and platform style. \
         The output should be ready to post as-is. Do not explain or wrap it in markdown or \
         JSON; just return the final text.\n\n\
         CRITICAL: Do NOT include any source links, URLs, or citations in your response.\n",
        platform = project.platform,
        name = project.name,
        niche = or_unset(&project.niche),
        description = or_unset(&project.description),
        tone = or_unset(&project.tone),
        guidance = project.platform.draft_guidance(),
    )
}

/// Build the image prompt for an idea and its draft.
pub fn build_image_prompt(idea_text: &str, draft_content: &str, project: &ProjectContext) -> String {
    format!(
        "Create an illustrative image for the following social media post. Use the project \
         context to understand the style, tone, and visual direction, but focus the image on \
         the content itself, not the project details. Avoid using text in the image unless \
         it's absolutely essential for the illustration.\n\n\
         Project context (for style reference only):\n\
         - Project name: {name}\n\
         - Niche: {niche}\n\
         - Description: {description}\n\
         - Tone: {tone}\n\
         - Platform: {platform}\n\n\
         Post idea: {idea_text}\n\n\
         Create an image that illustrates: {draft_content}\n\n\
         Important: Use minimal or no text in the image. Only include text if it's crucial \
         for understanding the visual concept.",
        name = project.name,
        niche = or_unset(&project.niche),
        description = or_unset(&project.description),
        tone = or_unset(&project.tone),
        platform = project.platform,
    )
}

//! Handlers for stateless content operations: `/content/generate` and
//! `/content/rewrite`.

use axum::extract::State;
use axum::Json;
use posty_ai::content;
use posty_core::error::CoreError;
use posty_core::idea::validate_idea_text;
use posty_core::project::Platform;
use posty_core::rewrite::{validate_rewrite_text, RewriteAction};
use posty_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::ownership::{ensure_idea_owned, ensure_project_owned, mark_content_generated};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /content/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateDraftRequest {
    pub idea_text: Option<String>,
    pub project_id: Option<DbId>,
    /// Overrides the project's platform for this draft only.
    pub platform: Option<String>,
    /// When set, a `new` idea advances to `content_generated`.
    pub idea_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct GenerateDraftResponse {
    pub content: String,
}

/// Request body for `POST /content/rewrite`.
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub text: Option<String>,
    pub action: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub text: String,
}

/// POST /api/v1/content/generate
///
/// Returns the generated draft without saving it.
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerateDraftRequest>,
) -> AppResult<Json<GenerateDraftResponse>> {
    let (idea_text, project_id) = match (input.idea_text, input.project_id) {
        (Some(text), Some(id)) => (text, id),
        _ => {
            return Err(
                CoreError::MissingFields("idea_text and project_id are required".into()).into(),
            )
        }
    };
    validate_idea_text(&idea_text)?;
    let platform = input
        .platform
        .as_deref()
        .map(str::parse::<Platform>)
        .transpose()?;

    let project = ensure_project_owned(&state.pool, project_id, auth.user_id).await?;
    let idea = match input.idea_id {
        Some(idea_id) => Some(ensure_idea_owned(&state.pool, idea_id, auth.user_id).await?),
        None => None,
    };

    let mut context = project.context();
    if let Some(platform) = platform {
        context = context.with_platform(platform);
    }

    let draft =
        content::generate_draft(state.text_generator.as_ref(), idea_text.trim(), &context).await?;

    if let Some(idea) = &idea {
        mark_content_generated(&state.pool, idea, auth.user_id).await?;
    }

    tracing::info!(
        user_id = %auth.user_id,
        project_id = %project_id,
        platform = %context.platform,
        "Draft generated"
    );
    Ok(Json(GenerateDraftResponse { content: draft }))
}

/// POST /api/v1/content/rewrite
///
/// Nothing is persisted.
pub async fn rewrite(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<RewriteRequest>,
) -> AppResult<Json<RewriteResponse>> {
    let (text, action) = match (input.text, input.action) {
        (Some(text), Some(action)) => (text, action),
        _ => {
            return Err(CoreError::MissingFields("text and action are required".into()).into())
        }
    };
    validate_rewrite_text(&text)?;
    let action = RewriteAction::parse(&action, input.prompt.as_deref())?;

    let rewritten = content::rewrite(state.text_generator.as_ref(), &action, &text).await?;

    tracing::info!(user_id = %auth.user_id, action = action.name(), "Content rewritten");
    Ok(Json(RewriteResponse { text: rewritten }))
}

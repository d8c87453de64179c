//! Handlers for the draft attached to an idea: `/ideas/{id}/draft`.

use axum::extract::State;
use axum::Json;
use posty_core::draft::validate_draft_content;
use posty_core::error::CoreError;
use posty_core::types::DbId;
use posty_db::models::draft::Draft;
use posty_db::repositories::DraftRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::ownership::{ensure_idea_owned, mark_content_generated};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /ideas/{id}/draft`.
#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub content: Option<String>,
}

/// `{ "draft": Draft | null }`
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: Option<Draft>,
}

/// GET /api/v1/ideas/{id}/draft
///
/// `draft` is `null` when the idea has no draft or is not the caller's.
pub async fn get(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(idea_id): AppPath<DbId>,
) -> AppResult<Json<DraftResponse>> {
    let draft = DraftRepo::find_by_idea(&state.pool, idea_id, auth.user_id).await?;
    Ok(Json(DraftResponse { draft }))
}

/// PUT /api/v1/ideas/{id}/draft
///
/// Creates or replaces the idea's single draft, then advances a `new`
/// idea to `content_generated`.
pub async fn save(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(idea_id): AppPath<DbId>,
    AppJson(input): AppJson<SaveDraftRequest>,
) -> AppResult<Json<DraftResponse>> {
    let content = input
        .content
        .ok_or_else(|| CoreError::MissingFields("content".to_string()))?;
    validate_draft_content(&content)?;

    let idea = ensure_idea_owned(&state.pool, idea_id, auth.user_id).await?;

    let draft = DraftRepo::upsert(&state.pool, idea_id, auth.user_id, &content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }))?;

    mark_content_generated(&state.pool, &idea, auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, idea_id = %idea_id, draft_id = %draft.id, "Draft saved");
    Ok(Json(DraftResponse { draft: Some(draft) }))
}

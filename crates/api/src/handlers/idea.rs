//! Handlers for ideas.
//!
//! Project-scoped: `/projects/{project_id}/ideas[/generate]`.
//! Idea-scoped: `/ideas/{id}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use posty_ai::content;
use posty_core::error::CoreError;
use posty_core::idea::{validate_idea_change, validate_idea_text, PreviousIdea};
use posty_core::types::DbId;
use posty_db::models::idea::{Idea, UpdateIdea};
use posty_db::repositories::IdeaRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::ownership::ensure_project_owned;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/ideas`.
#[derive(Debug, Deserialize)]
pub struct CreateIdeaRequest {
    pub idea_text: Option<String>,
}

/// Request body for `PUT /ideas/{id}`. At least one field is required.
#[derive(Debug, Deserialize)]
pub struct UpdateIdeaRequest {
    pub idea_text: Option<String>,
    pub status: Option<String>,
}

/// GET /api/v1/projects/{project_id}/ideas
///
/// Newest first. An unknown or foreign project yields an empty list.
pub async fn list_by_project(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Idea>>>> {
    let ideas = IdeaRepo::list_by_project(&state.pool, project_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// POST /api/v1/projects/{project_id}/ideas
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateIdeaRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Idea>>)> {
    let idea_text = input
        .idea_text
        .ok_or_else(|| CoreError::MissingFields("idea_text".to_string()))?;
    validate_idea_text(&idea_text)?;

    let idea = IdeaRepo::create(&state.pool, auth.user_id, project_id, idea_text.trim())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    tracing::info!(user_id = %auth.user_id, idea_id = %idea.id, "Idea created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: idea })))
}

/// POST /api/v1/projects/{project_id}/ideas/generate
///
/// Asks the model for up to five fresh ideas that avoid the project's
/// non-archived ideas, then inserts all survivors in one statement.
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Idea>>>)> {
    let project = ensure_project_owned(&state.pool, project_id, auth.user_id).await?;

    let previous: Vec<PreviousIdea> =
        IdeaRepo::list_active_by_project(&state.pool, project_id, auth.user_id)
            .await?
            .into_iter()
            .map(|idea| PreviousIdea {
                idea_text: idea.idea_text,
                status: idea.status,
            })
            .collect();

    let texts =
        content::generate_ideas(state.text_generator.as_ref(), &project.context(), &previous)
            .await?;

    let ideas = IdeaRepo::create_batch(&state.pool, auth.user_id, project_id, &texts).await?;
    if ideas.is_empty() {
        // The project disappeared between the ownership check and the insert.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    tracing::info!(
        user_id = %auth.user_id,
        project_id = %project_id,
        count = ideas.len(),
        "Ideas generated"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: ideas })))
}

/// PUT /api/v1/ideas/{id}
///
/// Edits text and/or status. Any status in the enum may be chosen. An idea
/// the caller does not own is left untouched.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateIdeaRequest>,
) -> AppResult<Json<SuccessResponse>> {
    let change = validate_idea_change(input.idea_text.as_deref(), input.status.as_deref())?;
    let update = UpdateIdea {
        idea_text: change.idea_text,
        status: change.status,
    };

    let updated = IdeaRepo::update(&state.pool, id, auth.user_id, &update).await?;
    if updated {
        tracing::info!(user_id = %auth.user_id, idea_id = %id, "Idea updated");
    } else {
        tracing::debug!(user_id = %auth.user_id, idea_id = %id, "Idea update matched no rows");
    }
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/v1/ideas/{id}
///
/// Archives the idea. The row is kept.
pub async fn archive(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let archived = IdeaRepo::archive(&state.pool, id, auth.user_id).await?;
    if archived {
        tracing::info!(user_id = %auth.user_id, idea_id = %id, "Idea archived");
    }
    Ok(StatusCode::NO_CONTENT)
}

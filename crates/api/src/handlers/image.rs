//! Handler for `POST /ideas/{id}/image`.

use axum::extract::State;
use axum::Json;
use posty_ai::{content, GeneratedImage};
use posty_core::error::CoreError;
use posty_core::types::DbId;
use posty_db::repositories::{DraftRepo, IdeaRepo};
use posty_storage::image_object_path;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::handlers::ownership::{ensure_idea_owned, ensure_project_owned};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image_url: String,
}

/// POST /api/v1/ideas/{id}/image
///
/// Illustrates the idea's saved draft, uploads the bytes when the backend
/// returns them inline, and overwrites the idea's `image_url`.
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(idea_id): AppPath<DbId>,
) -> AppResult<Json<ImageResponse>> {
    let idea = ensure_idea_owned(&state.pool, idea_id, auth.user_id).await?;
    let project = ensure_project_owned(&state.pool, idea.project_id, auth.user_id).await?;
    let draft = DraftRepo::find_by_idea(&state.pool, idea_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: idea_id,
        }))?;

    let image = content::generate_image(
        state.image_generator.as_ref(),
        &idea.idea_text,
        &draft.content,
        &project.context(),
    )
    .await?;

    let image_url = match image {
        GeneratedImage::Bytes { data, content_type } => {
            let path = image_object_path(idea_id, chrono::Utc::now().timestamp_millis());
            state
                .object_store
                .upload(&path, data, &content_type)
                .await?
        }
        GeneratedImage::Url(url) => url,
    };

    let updated = IdeaRepo::set_image_url(&state.pool, idea_id, auth.user_id, &image_url).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Idea",
            id: idea_id,
        }));
    }

    tracing::info!(user_id = %auth.user_id, idea_id = %idea_id, "Idea image generated");
    Ok(Json(ImageResponse { image_url }))
}

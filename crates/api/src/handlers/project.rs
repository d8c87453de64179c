//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use posty_core::error::CoreError;
use posty_core::project::{validate_project_field, validate_project_name, Platform};
use posty_core::types::DbId;
use posty_db::models::project::{CreateProject, Project, UpdateProject};
use posty_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::ownership::ensure_project_owned;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub platform: Option<String>,
}

/// Request body for `PUT /projects/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub platform: Option<String>,
}

fn validate_free_text(
    niche: &Option<String>,
    description: &Option<String>,
    tone: &Option<String>,
) -> Result<(), CoreError> {
    validate_project_field("niche", niche.as_deref())?;
    validate_project_field("description", description.as_deref())?;
    validate_project_field("tone", tone.as_deref())
}

impl CreateProjectRequest {
    fn validate(self) -> Result<CreateProject, CoreError> {
        let name = self
            .name
            .ok_or_else(|| CoreError::MissingFields("name".to_string()))?;
        validate_project_name(&name)?;
        validate_free_text(&self.niche, &self.description, &self.tone)?;
        let platform = self
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()?
            .unwrap_or_default();

        Ok(CreateProject {
            name: name.trim().to_string(),
            niche: self.niche,
            description: self.description,
            tone: self.tone,
            platform,
        })
    }
}

impl UpdateProjectRequest {
    fn validate(self) -> Result<UpdateProject, CoreError> {
        if let Some(name) = &self.name {
            validate_project_name(name)?;
        }
        validate_free_text(&self.niche, &self.description, &self.tone)?;
        let platform = self
            .platform
            .as_deref()
            .map(str::parse::<Platform>)
            .transpose()?;

        Ok(UpdateProject {
            name: self.name.map(|n| n.trim().to_string()),
            niche: self.niche,
            description: self.description,
            tone: self.tone,
            platform,
        })
    }
}

/// GET /api/v1/projects
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let input = input.validate()?;
    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = %auth.user_id, project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ensure_project_owned(&state.pool, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let input = input.validate()?;
    let project = ProjectRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(user_id = %auth.user_id, project_id = %id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Permanently removes the project together with its ideas and drafts.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = ProjectRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(user_id = %auth.user_id, project_id = %id, "Project deleted");
    Ok(Json(SuccessResponse::ok()))
}

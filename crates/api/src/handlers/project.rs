//! Handlers for the `/projects` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use taskboard_core::error::CoreError;
use taskboard_core::pagination::Page;
use taskboard_core::types::DbId;
use taskboard_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectDetailParams, ProjectListParams,
    ProjectSummary, UpdateProject,
};
use taskboard_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects
///
/// Filters: `status`, `owner_id`, `deadline_passed`. Paging: `page` /
/// `per_page`, or legacy `limit` / `offset`.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    params: Result<Query<ProjectListParams>, QueryRejection>,
) -> AppResult<Json<Page<ProjectSummary>>> {
    let Query(params) = params?;
    let page = ProjectRepo::list(
        &state.pool,
        &params.filter(),
        params.page_request(),
        Utc::now(),
    )
    .await?;
    Ok(Json(page))
}

/// POST /api/v1/projects
///
/// The authenticated user becomes the owner.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = ProjectRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(project_id = project.id, owner_id = auth.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
///
/// Nested task page is addressed by `tasks_page` / `tasks_per_page`.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    params: Result<Query<ProjectDetailParams>, QueryRejection>,
) -> AppResult<Json<ProjectDetail>> {
    let Query(params) = params?;
    let detail = ProjectRepo::find_detail(&state.pool, id, params.tasks_page_request())
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(detail))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Project", id)))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft delete; the project's tasks disappear from every listing with it.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Project", id)))
    }
}

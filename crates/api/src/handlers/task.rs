//! Handlers for the `/tasks` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::pagination::Page;
use taskboard_core::types::DbId;
use taskboard_db::models::task::{
    CommentPageParams, CreateTask, Task, TaskDetail, TaskListParams, TaskSummary, UpdateTask,
    UpdateTaskAssignee, UpdateTaskPriority, UpdateTaskStatus,
};
use taskboard_db::repositories::{ProjectRepo, TaskRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// Filters: `status`, `priority`, `assigned_to`, `project_id`. Paging:
/// `page` / `per_page`, or legacy `limit` / `offset`.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    params: Result<Query<TaskListParams>, QueryRejection>,
) -> AppResult<Json<Page<TaskSummary>>> {
    let Query(params) = params?;
    let page = TaskRepo::list(&state.pool, &params.filter(), params.page_request()).await?;
    Ok(Json(page))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;
    ensure_project(&state, input.project_id).await?;
    if let Some(user_id) = input.assigned_to {
        ensure_user(&state, user_id).await?;
    }

    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(task_id = task.id, project_id = task.project_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks/{id}
///
/// Nested comment page is addressed by `page` / `per_page`.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    params: Result<Query<CommentPageParams>, QueryRejection>,
) -> AppResult<Json<TaskDetail>> {
    let Query(params) = params?;
    let detail = TaskRepo::find_detail(&state.pool, &state.pool, id, params.page_request())
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;
    Ok(Json(detail))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    input.validate()?;
    if let Some(project_id) = input.project_id {
        ensure_project(&state, project_id).await?;
    }
    if let Some(user_id) = input.assigned_to {
        ensure_user(&state, user_id).await?;
    }

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStatus>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;
    tracing::debug!(task_id = id, status = %task.status, "Task status changed");
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}/priority
pub async fn update_priority(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskPriority>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::update_priority(&state.pool, id, input.priority)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}/assignee
///
/// `{"assigned_to": null}` unassigns the task.
pub async fn update_assignee(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskAssignee>,
) -> AppResult<Json<Task>> {
    if let Some(user_id) = input.assigned_to {
        ensure_user(&state, user_id).await?;
    }
    let task = TaskRepo::update_assignee(&state.pool, id, input.assigned_to)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Task", id)))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
///
/// Hard delete; the task's comments go with it.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskRepo::delete(&state.pool, id).await? {
        tracing::info!(task_id = id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Task", id)))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A referenced project must be live, otherwise the request is invalid (422).
async fn ensure_project(state: &AppState, project_id: DbId) -> AppResult<()> {
    if ProjectRepo::exists(&state.pool, project_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "The selected project_id {project_id} is invalid"
        ))))
    }
}

/// A referenced assignee must exist, otherwise the request is invalid (422).
async fn ensure_user(state: &AppState, user_id: DbId) -> AppResult<()> {
    if UserRepo::exists(&state.pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "The selected assigned_to {user_id} is invalid"
        ))))
    }
}

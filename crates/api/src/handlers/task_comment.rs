//! Handlers for task comments.
//!
//! Edits and deletes are author-only. Someone else's comment answers 404,
//! the same as a missing one.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_core::pagination::Page;
use taskboard_core::types::DbId;
use taskboard_db::models::task::CommentPageParams;
use taskboard_db::models::task_comment::{CommentBody, TaskComment};
use taskboard_db::repositories::{TaskCommentRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/tasks/{task_id}/comments
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(task_id): Path<DbId>,
    params: Result<Query<CommentPageParams>, QueryRejection>,
) -> AppResult<Json<Page<TaskComment>>> {
    let Query(params) = params?;
    ensure_task(&state, task_id).await?;
    let page = TaskCommentRepo::list_for_task(&state.pool, task_id, params.page_request()).await?;
    Ok(Json(page))
}

/// POST /api/v1/tasks/{task_id}/comments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<CommentBody>,
) -> AppResult<(StatusCode, Json<TaskComment>)> {
    input.validate()?;
    ensure_task(&state, task_id).await?;
    let comment = TaskCommentRepo::create(&state.pool, task_id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /api/v1/tasks/comments/{comment_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<DbId>,
    Json(input): Json<CommentBody>,
) -> AppResult<Json<TaskComment>> {
    input.validate()?;
    let comment = TaskCommentRepo::update_by_author(&state.pool, comment_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("TaskComment", comment_id)))?;
    Ok(Json(comment))
}

/// DELETE /api/v1/tasks/comments/{comment_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TaskCommentRepo::delete_by_author(&state.pool, comment_id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("TaskComment", comment_id)))
    }
}

async fn ensure_task(state: &AppState, task_id: DbId) -> AppResult<()> {
    if TaskRepo::exists(&state.pool, task_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::not_found("Task", task_id)))
    }
}

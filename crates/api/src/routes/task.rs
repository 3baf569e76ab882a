//! Route definitions for the `/tasks` resource, including its comments.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{task, task_comment};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// PATCH  /{id}/status               -> update_status
/// PATCH  /{id}/priority             -> update_priority
/// PATCH  /{id}/assignee             -> update_assignee
///
/// GET    /{id}/comments             -> task_comment::list
/// POST   /{id}/comments             -> task_comment::create
/// PUT    /comments/{comment_id}     -> task_comment::update
/// DELETE /comments/{comment_id}     -> task_comment::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/status", patch(task::update_status))
        .route("/{id}/priority", patch(task::update_priority))
        .route("/{id}/assignee", patch(task::update_assignee))
        .route(
            "/{id}/comments",
            get(task_comment::list).post(task_comment::create),
        )
        .route(
            "/comments/{comment_id}",
            put(task_comment::update).delete(task_comment::delete),
        )
}

pub mod auth;
pub mod health;
pub mod project;
pub mod stats;
pub mod task;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register, /auth/login, /auth/refresh      public
/// /auth/logout                                    requires auth
///
/// /user                                           current user
/// /users                                          all users
///
/// /projects                                       list, create
/// /projects/{id}                                  detail, update, delete
///
/// /tasks                                          list, create
/// /tasks/{id}                                     detail, update, delete
/// /tasks/{id}/status|priority|assignee            PATCH
/// /tasks/{id}/comments                            list, create
/// /tasks/comments/{comment_id}                    update, delete (author only)
///
/// /stats                                          dashboard totals
/// /stats/projects                                 per-project overview
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(user::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/stats", stats::router())
}

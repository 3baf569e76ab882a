//! Handlers for user lookups.

use axum::extract::State;
use axum::Json;
use taskboard_core::error::CoreError;
use taskboard_db::models::user::UserSummary;
use taskboard_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserSummary>> {
    let user = UserRepo::find_summary(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    let users = UserRepo::list_summaries(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

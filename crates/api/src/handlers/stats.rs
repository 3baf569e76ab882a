use axum::extract::State;
use axum::Json;
use taskboard_db::models::stats::{DashboardStats, ProjectOverview};
use taskboard_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
pub async fn dashboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(StatsRepo::dashboard(&state.pool).await?))
}

/// GET /api/v1/stats/projects
pub async fn projects(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ProjectOverview>>>> {
    let rows = StatsRepo::project_overview(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

//! Dashboard statistics read models.

use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::DbId;

/// Totals across all live projects.
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    /// Percentage of tasks in `done`, rounded to two decimals. `0` without tasks.
    pub completion_percentage: f64,
}

/// Per-project completion overview row.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProjectOverview {
    pub project_id: DbId,
    pub project_name: String,
    pub owner_name: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    /// Percentage rounded to one decimal.
    pub completion_rate: f64,
    /// Distinct assignees among the project's tasks.
    pub team_members: i64,
    pub comment_count: i64,
}

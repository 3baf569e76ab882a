//! Read-only dashboard aggregates over live projects.

use sqlx::PgPool;

use crate::models::stats::{DashboardStats, ProjectOverview};

pub struct StatsRepo;

impl StatsRepo {
    /// Project, task and completion totals across all non-deleted projects.
    pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                COUNT(DISTINCT p.id) AS total_projects,
                COUNT(t.id) AS total_tasks,
                COUNT(t.id) FILTER (WHERE t.status = 'done') AS completed_tasks,
                COALESCE(
                    ROUND(
                        COUNT(t.id) FILTER (WHERE t.status = 'done') * 100.0
                            / NULLIF(COUNT(t.id), 0),
                        2
                    ),
                    0
                )::float8 AS completion_percentage
             FROM projects p
             LEFT JOIN tasks t ON t.project_id = p.id
             WHERE p.deleted_at IS NULL",
        )
        .fetch_one(pool)
        .await
    }

    /// Completion overview for every live project that has at least one task,
    /// best completion rate first.
    pub async fn project_overview(pool: &PgPool) -> Result<Vec<ProjectOverview>, sqlx::Error> {
        sqlx::query_as::<_, ProjectOverview>(
            "WITH task_metrics AS (
                SELECT
                    project_id,
                    COUNT(*) AS total_tasks,
                    COUNT(*) FILTER (WHERE status = 'done') AS completed_tasks,
                    COUNT(DISTINCT assigned_to) AS team_members
                FROM tasks
                GROUP BY project_id
             ),
             comment_metrics AS (
                SELECT t.project_id, COUNT(c.id) AS comment_count
                FROM tasks t
                JOIN task_comments c ON c.task_id = t.id
                GROUP BY t.project_id
             )
             SELECT
                p.id AS project_id,
                p.name AS project_name,
                u.name AS owner_name,
                tm.total_tasks,
                tm.completed_tasks,
                ROUND(tm.completed_tasks * 100.0 / tm.total_tasks, 1)::float8 AS completion_rate,
                tm.team_members,
                COALESCE(cm.comment_count, 0) AS comment_count
             FROM projects p
             JOIN users u ON u.id = p.owner_id
             JOIN task_metrics tm ON tm.project_id = p.id
             LEFT JOIN comment_metrics cm ON cm.project_id = p.id
             WHERE p.deleted_at IS NULL
             ORDER BY completion_rate DESC, p.id",
        )
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `projects` table.
//!
//! Projects are soft-deleted: every read and write here ignores rows whose
//! `deleted_at` is set.

use std::collections::HashMap;

use sqlx::PgPool;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::{DbId, Timestamp};

use crate::filters::build_project_filter;
use crate::models::project::{
    CreateProject, Project, ProjectDetail, ProjectFilter, ProjectStats, ProjectSummary,
    UpdateProject,
};
use crate::repositories::TaskRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, status, owner_id, deadline, created_at, updated_at";

/// Same columns qualified with the `p` alias used by the listing query.
const ALIASED_COLUMNS: &str = "p.id, p.name, p.description, p.status, p.owner_id, \
                               p.deadline, p.created_at, p.updated_at";

/// Provides CRUD, listing and detail assembly for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, status, owner_id, deadline)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.unwrap_or_default())
            .bind(owner_id)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a live (non-deleted) project with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// One page of projects matching `filter`, newest first, each with its
    /// task aggregates.
    ///
    /// Issues three statements regardless of page size: the total count, the
    /// page of rows, and one grouped count over the page's project ids.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        page: PageRequest,
        now: Timestamp,
    ) -> Result<Page<ProjectSummary>, sqlx::Error> {
        let clause = build_project_filter(filter, now);
        let where_sql = clause.where_sql();

        let count_query = format!("SELECT COUNT(*) FROM projects p {where_sql}");
        let total = clause
            .bind_to_scalar(sqlx::query_scalar::<_, i64>(&count_query))
            .fetch_one(pool)
            .await?;
        tracing::debug!(%where_sql, total, page = page.page(), "Project listing");

        let limit_idx = clause.next_bind_index();
        let rows_query = format!(
            "SELECT {ALIASED_COLUMNS} FROM projects p {where_sql} \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );
        let projects = clause
            .bind_to(sqlx::query_as::<_, Project>(&rows_query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let counts: HashMap<DbId, (i64, i64)> = TaskRepo::counts_by_project(pool, &ids)
            .await?
            .into_iter()
            .map(|c| (c.project_id, (c.tasks_count, c.completed_tasks_count)))
            .collect();

        let items = projects
            .into_iter()
            .map(|project| {
                let (tasks_count, completed_tasks_count) =
                    counts.get(&project.id).copied().unwrap_or((0, 0));
                ProjectSummary {
                    project,
                    tasks_count,
                    completed_tasks_count,
                }
            })
            .collect();

        Ok(Page::new(items, page, total))
    }

    /// Four-way task breakdown for one project in a single aggregate query.
    pub async fn task_stats(pool: &PgPool, project_id: DbId) -> Result<ProjectStats, sqlx::Error> {
        sqlx::query_as::<_, ProjectStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'todo') AS todo,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'done') AS completed
             FROM tasks
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Assemble the project detail payload: the project, its task stats and
    /// one page of its tasks (each with a comment count).
    ///
    /// Returns `None` if the project does not exist or is soft-deleted.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        tasks_page: PageRequest,
    ) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let stats = Self::task_stats(pool, id).await?;
        let tasks = TaskRepo::list_for_project(pool, id, tasks_page).await?;

        Ok(Some(ProjectDetail {
            project,
            stats,
            tasks: tasks.data,
            tasks_pagination: tasks.meta,
        }))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                deadline = COALESCE($5, deadline)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.deadline)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

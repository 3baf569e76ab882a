//! Repository for the `tasks` table.
//!
//! Tasks are hard-deleted, but a task whose project is soft-deleted is
//! invisible: every query joins `projects p` and requires
//! `p.deleted_at IS NULL`.

use std::collections::HashMap;

use sqlx::PgPool;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::filters::{build_project_tasks_filter, build_task_filter, FilterClause};
use crate::models::project::ProjectTaskCounts;
use crate::models::status::{TaskPriority, TaskStatus};
use crate::models::task::{CreateTask, Task, TaskDetail, TaskFilter, TaskSummary, UpdateTask};
use crate::repositories::TaskCommentRepo;
use crate::user_lookup::UserLookup;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, assigned_to, status, priority, \
                       estimated_hours, actual_hours, created_at, updated_at";

/// Same columns qualified with the `t` alias.
const ALIASED_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.assigned_to, \
                               t.status, t.priority, t.estimated_hours, t.actual_hours, \
                               t.created_at, t.updated_at";

/// Provides CRUD, listing, aggregation and detail assembly for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// The caller is responsible for checking that `project_id` refers to a
    /// live project.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, title, description, assigned_to, status, priority,
                 estimated_hours, actual_hours)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assigned_to)
            .bind(input.status.unwrap_or_default())
            .bind(input.priority.unwrap_or_default())
            .bind(input.estimated_hours)
            .bind(input.actual_hours.unwrap_or(0.0))
            .fetch_one(pool)
            .await
    }

    /// Find a visible task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {ALIASED_COLUMNS} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND p.deleted_at IS NULL"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a visible task with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM tasks t
                JOIN projects p ON p.id = t.project_id
                WHERE t.id = $1 AND p.deleted_at IS NULL
             )",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// One page of tasks matching `filter`, newest first, each with its
    /// comment count.
    pub async fn list(
        pool: &PgPool,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> Result<Page<TaskSummary>, sqlx::Error> {
        Self::list_page(pool, &build_task_filter(filter), page).await
    }

    /// One page of a single project's tasks (the nested collection on the
    /// project detail payload).
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        page: PageRequest,
    ) -> Result<Page<TaskSummary>, sqlx::Error> {
        Self::list_page(pool, &build_project_tasks_filter(project_id), page).await
    }

    async fn list_page(
        pool: &PgPool,
        clause: &FilterClause,
        page: PageRequest,
    ) -> Result<Page<TaskSummary>, sqlx::Error> {
        let where_sql = clause.where_sql();

        let count_query = format!(
            "SELECT COUNT(*) FROM tasks t JOIN projects p ON p.id = t.project_id {where_sql}"
        );
        let total = clause
            .bind_to_scalar(sqlx::query_scalar::<_, i64>(&count_query))
            .fetch_one(pool)
            .await?;
        tracing::debug!(%where_sql, total, page = page.page(), "Task listing");

        let limit_idx = clause.next_bind_index();
        let rows_query = format!(
            "SELECT {ALIASED_COLUMNS} FROM tasks t \
             JOIN projects p ON p.id = t.project_id {where_sql} \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );
        let tasks = clause
            .bind_to(sqlx::query_as::<_, Task>(&rows_query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
        let counts: HashMap<DbId, i64> = TaskCommentRepo::counts_by_task(pool, &ids)
            .await?
            .into_iter()
            .map(|c| (c.task_id, c.comments_count))
            .collect();

        let items = tasks
            .into_iter()
            .map(|task| {
                let comments_count = counts.get(&task.id).copied().unwrap_or(0);
                TaskSummary {
                    task,
                    comments_count,
                }
            })
            .collect();

        Ok(Page::new(items, page, total))
    }

    /// Total and `done` task counts for each of `project_ids`, in one grouped
    /// query. Projects without tasks are absent from the result.
    pub async fn counts_by_project(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectTaskCounts>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, ProjectTaskCounts>(
            "SELECT
                project_id,
                COUNT(*) AS tasks_count,
                COUNT(*) FILTER (WHERE status = 'done') AS completed_tasks_count
             FROM tasks
             WHERE project_id = ANY($1)
             GROUP BY project_id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// Assemble the task detail payload: the task, its assignee's public
    /// projection and one page of its comments.
    ///
    /// Returns `None` if the task is missing or its project is soft-deleted.
    pub async fn find_detail(
        pool: &PgPool,
        users: &dyn UserLookup,
        id: DbId,
        comments_page: PageRequest,
    ) -> Result<Option<TaskDetail>, sqlx::Error> {
        let Some(task) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let assignee = match task.assigned_to {
            Some(user_id) => users.find_summary(user_id).await?,
            None => None,
        };
        let comments = TaskCommentRepo::list_for_task(pool, id, comments_page).await?;

        Ok(Some(TaskDetail {
            task,
            assignee,
            comments: comments.data,
            comments_pagination: comments.meta,
        }))
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no visible task with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks AS t SET
                project_id = COALESCE($2, t.project_id),
                title = COALESCE($3, t.title),
                description = COALESCE($4, t.description),
                assigned_to = COALESCE($5, t.assigned_to),
                status = COALESCE($6, t.status),
                priority = COALESCE($7, t.priority),
                estimated_hours = COALESCE($8, t.estimated_hours),
                actual_hours = COALESCE($9, t.actual_hours)
             FROM projects p
             WHERE t.id = $1 AND p.id = t.project_id AND p.deleted_at IS NULL
             RETURNING {ALIASED_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assigned_to)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.estimated_hours)
            .bind(input.actual_hours)
            .fetch_optional(pool)
            .await
    }

    /// Set a task's status. Returns `None` if the task is not visible.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: TaskStatus,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks AS t SET status = $2
             FROM projects p
             WHERE t.id = $1 AND p.id = t.project_id AND p.deleted_at IS NULL
             RETURNING {ALIASED_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Set a task's priority. Returns `None` if the task is not visible.
    pub async fn update_priority(
        pool: &PgPool,
        id: DbId,
        priority: TaskPriority,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks AS t SET priority = $2
             FROM projects p
             WHERE t.id = $1 AND p.id = t.project_id AND p.deleted_at IS NULL
             RETURNING {ALIASED_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(priority)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear a task's assignee. Returns `None` if the task is not visible.
    pub async fn update_assignee(
        pool: &PgPool,
        id: DbId,
        assigned_to: Option<DbId>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks AS t SET assigned_to = $2
             FROM projects p
             WHERE t.id = $1 AND p.id = t.project_id AND p.deleted_at IS NULL
             RETURNING {ALIASED_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a visible task (its comments cascade). Returns
    /// `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tasks AS t
             USING projects p
             WHERE t.id = $1 AND p.id = t.project_id AND p.deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Task entity model, DTOs, filter bag and read models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::pagination::{
    PageMeta, PageRequest, DEFAULT_COMMENTS_PER_PAGE, DEFAULT_TASKS_PER_PAGE,
};
use taskboard_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::status::{TaskPriority, TaskStatus};
use crate::models::task_comment::TaskComment;
use crate::models::user::UserSummary;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub estimated_hours: Option<f64>,
    pub actual_hours: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    /// Defaults to `todo` if omitted.
    pub status: Option<TaskStatus>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<TaskPriority>,
    #[validate(range(min = 0.0))]
    pub estimated_hours: Option<f64>,
    #[validate(range(min = 0.0))]
    pub actual_hours: Option<f64>,
}

/// DTO for updating an existing task. All fields are optional.
///
/// `assigned_to` can only be set here; clearing it goes through
/// [`UpdateTaskAssignee`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[validate(range(min = 0.0))]
    pub estimated_hours: Option<f64>,
    #[validate(range(min = 0.0))]
    pub actual_hours: Option<f64>,
}

/// Body for `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Body for `PATCH /tasks/{id}/priority`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskPriority {
    pub priority: TaskPriority,
}

/// Body for `PATCH /tasks/{id}/assignee`. `null` unassigns the task.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskAssignee {
    pub assigned_to: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Filter bag for the task listing. Every key is optional and additive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<DbId>,
    pub project_id: Option<DbId>,
}

/// Query string for `GET /tasks`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Legacy addressing, honoured only without `page` / `per_page`.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<DbId>,
    pub project_id: Option<DbId>,
}

impl TaskListParams {
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            project_id: self.project_id,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::resolve(
            self.page,
            self.per_page,
            self.limit,
            self.offset,
            DEFAULT_TASKS_PER_PAGE,
        )
    }
}

/// Comment count for one task, as attached to listing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct TaskCommentCount {
    pub task_id: DbId,
    pub comments_count: i64,
}

/// A task listing row with its comment count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    #[serde(flatten)]
    pub task: Task,
    pub comments_count: i64,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Query string for `GET /tasks/{id}` and `GET /tasks/{id}/comments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl CommentPageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page, DEFAULT_COMMENTS_PER_PAGE)
    }
}

/// Task detail payload: the task, its assignee projection and one page of comments.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<UserSummary>,
    pub comments: Vec<TaskComment>,
    pub comments_pagination: PageMeta,
}

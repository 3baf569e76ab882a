//! Project entity model, DTOs, filter bag and read models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::pagination::{
    PageMeta, PageRequest, DEFAULT_PROJECTS_PER_PAGE, DEFAULT_PROJECT_TASKS_PER_PAGE,
};
use taskboard_core::types::{Date, DbId, Timestamp};
use validator::Validate;

use crate::models::status::ProjectStatus;
use crate::models::task::TaskSummary;

/// A project row from the `projects` table (tombstoned rows are never loaded).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: DbId,
    pub deadline: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a project. The owner comes from the session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `planned` if omitted.
    pub status: Option<ProjectStatus>,
    pub deadline: Option<Date>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub deadline: Option<Date>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Filter bag for the project listing. Every key is optional and additive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<DbId>,
    /// `true`: deadline before now. `false`: deadline now or later.
    pub deadline_passed: Option<bool>,
}

/// Query string for `GET /projects`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Legacy addressing, honoured only without `page` / `per_page`.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<DbId>,
    pub deadline_passed: Option<bool>,
}

impl ProjectListParams {
    pub fn filter(&self) -> ProjectFilter {
        ProjectFilter {
            status: self.status,
            owner_id: self.owner_id,
            deadline_passed: self.deadline_passed,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::resolve(
            self.page,
            self.per_page,
            self.limit,
            self.offset,
            DEFAULT_PROJECTS_PER_PAGE,
        )
    }
}

/// Task counts for one project, as attached to listing rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ProjectTaskCounts {
    pub project_id: DbId,
    pub tasks_count: i64,
    pub completed_tasks_count: i64,
}

/// A project listing row with its task aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub tasks_count: i64,
    pub completed_tasks_count: i64,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Query string for `GET /projects/{id}`; paginates the nested task list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectDetailParams {
    pub tasks_page: Option<i64>,
    pub tasks_per_page: Option<i64>,
}

impl ProjectDetailParams {
    pub fn tasks_page_request(&self) -> PageRequest {
        PageRequest::new(
            self.tasks_page,
            self.tasks_per_page,
            DEFAULT_PROJECT_TASKS_PER_PAGE,
        )
    }
}

/// Four-way task breakdown for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct ProjectStats {
    pub total: i64,
    pub todo: i64,
    pub in_progress: i64,
    pub completed: i64,
}

/// Project detail payload: the project, its stats and one page of its tasks.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub stats: ProjectStats,
    pub tasks: Vec<TaskSummary>,
    pub tasks_pagination: PageMeta,
}

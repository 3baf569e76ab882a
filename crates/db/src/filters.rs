//! Dynamic WHERE-clause construction for the filtered listings.
//!
//! A filter bag becomes a conjunction of predicates with numbered
//! placeholders (`$1`, `$2`, ...) and a parallel list of typed bind values.
//! Absent keys contribute nothing, so an empty bag only carries the
//! visibility predicates (tombstoned projects are always hidden).

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;
use taskboard_core::types::{DbId, Timestamp};

use crate::models::project::ProjectFilter;
use crate::models::status::{ProjectStatus, TaskPriority, TaskStatus};
use crate::models::task::TaskFilter;

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    ProjectStatus(ProjectStatus),
    TaskStatus(TaskStatus),
    TaskPriority(TaskPriority),
    Timestamp(Timestamp),
}

/// A conjunction of SQL predicates plus the values bound to their placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterClause {
    conditions: Vec<String>,
    bind_values: Vec<BindValue>,
}

impl FilterClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate that binds no value.
    pub fn push_raw(&mut self, condition: impl Into<String>) {
        self.conditions.push(condition.into());
    }

    /// Add `column op $n`, binding `value` to the next placeholder.
    pub fn push(&mut self, column: &str, op: &str, value: BindValue) {
        let idx = self.next_bind_index();
        self.conditions.push(format!("{column} {op} ${idx}"));
        self.bind_values.push(value);
    }

    /// Index of the placeholder the caller should use next (e.g. for LIMIT).
    pub fn next_bind_index(&self) -> usize {
        self.bind_values.len() + 1
    }

    /// `WHERE a AND b ...`, or an empty string when there are no predicates.
    pub fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn bind_values(&self) -> &[BindValue] {
        &self.bind_values
    }

    /// Bind every value, in placeholder order, to a `query_as`.
    pub fn bind_to<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.bind_values {
            q = match *val {
                BindValue::BigInt(v) => q.bind(v),
                BindValue::ProjectStatus(v) => q.bind(v),
                BindValue::TaskStatus(v) => q.bind(v),
                BindValue::TaskPriority(v) => q.bind(v),
                BindValue::Timestamp(v) => q.bind(v),
            };
        }
        q
    }

    /// Bind every value, in placeholder order, to a `query_scalar`.
    pub fn bind_to_scalar<'q, O>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for val in &self.bind_values {
            q = match *val {
                BindValue::BigInt(v) => q.bind(v),
                BindValue::ProjectStatus(v) => q.bind(v),
                BindValue::TaskStatus(v) => q.bind(v),
                BindValue::TaskPriority(v) => q.bind(v),
                BindValue::Timestamp(v) => q.bind(v),
            };
        }
        q
    }
}

/// Build the predicate set for the project listing over alias `p`.
///
/// `now` is the instant `deadline_passed` compares against.
pub fn build_project_filter(filter: &ProjectFilter, now: Timestamp) -> FilterClause {
    let mut clause = FilterClause::new();
    clause.push_raw("p.deleted_at IS NULL");

    if let Some(status) = filter.status {
        clause.push("p.status", "=", BindValue::ProjectStatus(status));
    }

    if let Some(owner_id) = filter.owner_id {
        clause.push("p.owner_id", "=", BindValue::BigInt(owner_id));
    }

    match filter.deadline_passed {
        Some(true) => clause.push("p.deadline", "<", BindValue::Timestamp(now)),
        Some(false) => clause.push("p.deadline", ">=", BindValue::Timestamp(now)),
        None => {}
    }

    clause
}

/// Build the predicate set for the task listing over alias `t`.
///
/// The query must join `projects p ON p.id = t.project_id`; tasks of
/// tombstoned projects are excluded.
pub fn build_task_filter(filter: &TaskFilter) -> FilterClause {
    let mut clause = FilterClause::new();
    clause.push_raw("p.deleted_at IS NULL");

    if let Some(status) = filter.status {
        clause.push("t.status", "=", BindValue::TaskStatus(status));
    }

    if let Some(priority) = filter.priority {
        clause.push("t.priority", "=", BindValue::TaskPriority(priority));
    }

    if let Some(assigned_to) = filter.assigned_to {
        clause.push("t.assigned_to", "=", BindValue::BigInt(assigned_to));
    }

    if let Some(project_id) = filter.project_id {
        clause.push("t.project_id", "=", BindValue::BigInt(project_id));
    }

    clause
}

/// Predicate set restricting tasks to one live project (nested task pages).
pub fn build_project_tasks_filter(project_id: DbId) -> FilterClause {
    build_task_filter(&TaskFilter {
        project_id: Some(project_id),
        ..TaskFilter::default()
    })
}

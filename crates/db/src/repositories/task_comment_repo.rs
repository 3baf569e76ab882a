//! Repository for the `task_comments` table.
//!
//! Edits and deletes are scoped to the author: a non-author call matches no
//! row and reports the same outcome as a missing comment. Comments on a task
//! whose project is soft-deleted cannot be changed either.

use sqlx::PgPool;
use taskboard_core::pagination::{Page, PageRequest};
use taskboard_core::types::DbId;

use crate::models::task::TaskCommentCount;
use crate::models::task_comment::{CommentBody, TaskComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, user_id, comment, created_at, updated_at";

/// Same columns qualified with the `c` alias.
const ALIASED_COLUMNS: &str = "c.id, c.task_id, c.user_id, c.comment, c.created_at, c.updated_at";

/// Provides CRUD operations for task comments.
pub struct TaskCommentRepo;

impl TaskCommentRepo {
    /// Insert a comment authored by `user_id` on `task_id`.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        user_id: DbId,
        input: &CommentBody,
    ) -> Result<TaskComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_comments (task_id, user_id, comment)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .bind(user_id)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_comments WHERE id = $1");
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a task's comments, newest first.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
        page: PageRequest,
    ) -> Result<Page<TaskComment>, sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM task_comments WHERE task_id = $1",
        )
        .bind(task_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM task_comments
             WHERE task_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let comments = sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(comments, page, total))
    }

    /// Comment counts for each of `task_ids` in one grouped query. Tasks
    /// without comments are absent from the result.
    pub async fn counts_by_task(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<TaskCommentCount>, sqlx::Error> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, TaskCommentCount>(
            "SELECT task_id, COUNT(*) AS comments_count
             FROM task_comments
             WHERE task_id = ANY($1)
             GROUP BY task_id",
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace the text of a comment if `author_id` wrote it.
    ///
    /// Returns `None` when the comment is missing or belongs to someone else.
    pub async fn update_by_author(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        input: &CommentBody,
    ) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!(
            "UPDATE task_comments AS c SET comment = $3
             FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE c.id = $1 AND c.user_id = $2
               AND t.id = c.task_id AND p.deleted_at IS NULL
             RETURNING {ALIASED_COLUMNS}"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .bind(author_id)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment if `author_id` wrote it. Returns `true` if a row was removed.
    pub async fn delete_by_author(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM task_comments AS c
             USING tasks t, projects p
             WHERE c.id = $1 AND c.user_id = $2
               AND t.id = c.task_id AND p.id = t.project_id AND p.deleted_at IS NULL",
        )
        .bind(id)
        .bind(author_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

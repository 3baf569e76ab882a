//! Task comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};
use validator::Validate;

/// A comment row from the `task_comments` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TaskComment {
    pub id: DbId,
    pub task_id: DbId,
    /// Author of the comment.
    pub user_id: DbId,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for creating or editing a comment. Task and author come from the path and session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentBody {
    #[validate(length(min = 1, max = 5000))]
    pub comment: String,
}

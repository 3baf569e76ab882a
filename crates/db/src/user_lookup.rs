//! On-demand user resolution for read models.
//!
//! Tasks and projects only carry user ids. Assemblers that need a user's
//! public projection ask a [`UserLookup`] instead of joining the users table,
//! which keeps user management out of the task/project queries.

use async_trait::async_trait;
use sqlx::PgPool;
use taskboard_core::types::DbId;

use crate::models::user::UserSummary;
use crate::repositories::UserRepo;

/// Resolves user ids to their public `{id, name, email}` projection.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Returns `None` when no user has this id.
    async fn find_summary(&self, id: DbId) -> Result<Option<UserSummary>, sqlx::Error>;
}

#[async_trait]
impl UserLookup for PgPool {
    async fn find_summary(&self, id: DbId) -> Result<Option<UserSummary>, sqlx::Error> {
        UserRepo::find_summary(self, id).await
    }
}

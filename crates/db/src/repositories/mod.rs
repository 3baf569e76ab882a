//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Lookups return `Option`; a
//! missing row is never an error at this layer.

pub mod project_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod task_comment_repo;
pub mod task_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use task_comment_repo::TaskCommentRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;

pub mod auth;
pub mod project;
pub mod stats;
pub mod task;
pub mod task_comment;
pub mod user;

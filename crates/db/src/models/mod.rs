//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Read models assembled from several queries (list items, detail payloads)

pub mod project;
pub mod session;
pub mod stats;
pub mod status;
pub mod task;
pub mod task_comment;
pub mod user;

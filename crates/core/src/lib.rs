//! Domain primitives shared by the database and API crates.
//!
//! This crate has no database or HTTP dependencies so the pagination math
//! and error taxonomy can be unit tested in isolation.

pub mod error;
pub mod pagination;
pub mod types;

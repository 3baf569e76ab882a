//! Shared response envelope types for API handlers.
//!
//! Non-paginated collections use a `{ "data": ... }` envelope. Paginated
//! listings serialize a [`taskboard_core::pagination::Page`] directly, which
//! carries `data` plus the page metadata at the same level.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

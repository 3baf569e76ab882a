//! Page windowing and the pagination envelope.
//!
//! Two addressing modes reach the repositories:
//!
//! - `page` + `per_page` (canonical). `offset = (page - 1) * per_page`.
//! - `limit` + `offset` (legacy). Only honoured when neither `page` nor
//!   `per_page` is present; the offset is floored to the page containing it.
//!
//! Both resolve to a [`PageRequest`], and every paginated response carries a
//! [`PageMeta`] computed from the request, the filtered total and the number
//! of rows actually returned.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default page size for the project listing.
pub const DEFAULT_PROJECTS_PER_PAGE: i64 = 10;

/// Default page size for the task listing.
pub const DEFAULT_TASKS_PER_PAGE: i64 = 20;

/// Default page size for a project's tasks on the project detail payload.
pub const DEFAULT_PROJECT_TASKS_PER_PAGE: i64 = 10;

/// Default page size for a task's comments.
pub const DEFAULT_COMMENTS_PER_PAGE: i64 = 10;

/// Upper bound for any page size.
pub const MAX_PER_PAGE: i64 = 100;

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A resolved, clamped page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Build a request from `page` / `per_page`, applying defaults and clamps.
    ///
    /// `page` is clamped to at least 1 and `per_page` to `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<i64>, per_page: Option<i64>, default_per_page: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: clamp_per_page(per_page, default_per_page),
        }
    }

    /// Build a request from legacy `limit` / `offset` parameters.
    pub fn from_limit_offset(
        limit: Option<i64>,
        offset: Option<i64>,
        default_per_page: i64,
    ) -> Self {
        let per_page = clamp_per_page(limit, default_per_page);
        let offset = offset.unwrap_or(0).max(0);
        Self {
            page: offset / per_page + 1,
            per_page,
        }
    }

    /// Pick the addressing mode from whichever parameters were supplied.
    ///
    /// `page` / `per_page` win whenever either is present.
    pub fn resolve(
        page: Option<i64>,
        per_page: Option<i64>,
        limit: Option<i64>,
        offset: Option<i64>,
        default_per_page: i64,
    ) -> Self {
        let legacy = page.is_none() && per_page.is_none();
        if legacy && (limit.is_some() || offset.is_some()) {
            Self::from_limit_offset(limit, offset, default_per_page)
        } else {
            Self::new(page, per_page, default_per_page)
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Effective page size.
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// SQL `LIMIT` for this window.
    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// SQL `OFFSET` for this window.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

fn clamp_per_page(per_page: Option<i64>, default_per_page: i64) -> i64 {
    per_page
        .unwrap_or(default_per_page)
        .clamp(1, MAX_PER_PAGE)
}

// ---------------------------------------------------------------------------
// PageMeta / Page
// ---------------------------------------------------------------------------

/// Pagination envelope describing where a page sits in the filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    /// Rows matching the filters, independent of the window.
    pub total: i64,
    /// 1-based index of the first returned row, `None` when the page is empty.
    pub first_item: Option<i64>,
    /// 1-based index of the last returned row, `None` when the page is empty.
    pub last_item: Option<i64>,
}

impl PageMeta {
    /// Compute the envelope for a window that returned `item_count` rows.
    pub fn new(request: PageRequest, total: i64, item_count: usize) -> Self {
        let total = total.max(0);
        let item_count = i64::try_from(item_count).unwrap_or(i64::MAX);
        let (first_item, last_item) = if item_count == 0 {
            (None, None)
        } else {
            let first = request.offset() + 1;
            (Some(first), Some(first + item_count - 1))
        };

        Self {
            current_page: request.page(),
            last_page: last_page(total, request.per_page()),
            per_page: request.per_page(),
            total,
            first_item,
            last_item,
        }
    }
}

/// `max(1, ceil(total / per_page))`.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    let per_page = per_page.max(1);
    let pages = (total.max(0) + per_page - 1) / per_page;
    pages.max(1)
}

/// One page of rows plus its envelope.
///
/// Serializes flat: `{ "data": [...], "current_page": .., "total": .., ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap fetched rows with an envelope computed from `request` and `total`.
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        let meta = PageMeta::new(request, total, data.len());
        Self { data, meta }
    }

    /// Transform the rows while keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

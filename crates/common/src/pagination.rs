//! Pagination utilities
//!
//! `Pagination` normalizes raw page/limit input, `PageInfo` is the metadata
//! block returned next to every paginated list.

use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Highest page whose offset still fits a signed 64-bit SQL OFFSET at any limit.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Build from raw (possibly missing or out of range) query values.
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.map(|p| p.max(1) as u64).unwrap_or(DEFAULT_PAGE);
        let limit = limit.map(|l| l.max(1) as u64).unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }.clamped()
    }

    /// 1 <= page <= MAX_PAGE and 1 <= limit <= MAX_LIMIT
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.clamp(1, MAX_PAGE),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Zero-based page index and page size, as the ORM paginator expects.
    pub fn normalize(self) -> (u64, u64) {
        let c = self.clamped();
        (c.page - 1, c.limit)
    }

    /// Rows skipped before this page.
    pub fn offset(self) -> u64 {
        let (idx, limit) = self.normalize();
        idx * limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn new(opts: Pagination, total: u64) -> Self {
        let opts = opts.clamped();
        let pages = total.div_ceil(opts.limit);
        Self {
            page: opts.page,
            limit: opts.limit,
            total,
            pages,
            has_next_page: opts.page < pages,
            has_previous_page: opts.page > 1,
        }
    }
}

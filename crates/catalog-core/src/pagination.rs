//! Page-based pagination with a fixed page size.
//!
//! Listing endpoints accept a 1-indexed page number and always return pages of
//! [`PAGE_SIZE`] items. The window is translated into `LIMIT`/`OFFSET` by the
//! store; a page past the end simply yields no rows.
//!
//! # Example
//!
//! ```ignore
//! use catalog_core::pagination::{PageWindow, PAGE_SIZE, total_pages};
//!
//! let window = PageWindow::new(Some(2), PAGE_SIZE);
//! assert_eq!(window.offset, 10);
//! assert_eq!(total_pages(25, PAGE_SIZE), 3);
//! ```

/// Number of items per page on paginated listings.
pub const PAGE_SIZE: i64 = 10;

/// A slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-indexed page number
    pub page: i64,
    /// Maximum rows returned
    pub limit: i64,
    /// Rows skipped before the first returned row
    pub offset: i64,
}

impl PageWindow {
    /// Builds the window for `page`, defaulting to the first page.
    ///
    /// Page numbers below 1 are clamped to 1.
    #[must_use]
    pub fn new(page: Option<i64>, page_size: i64) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = page_size.max(1);
        let offset = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            offset,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, PAGE_SIZE)
    }
}

/// Number of pages needed to hold `total` items, `ceil(total / page_size)`.
#[must_use]
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    let page_size = page_size.max(1);
    (total + page_size - 1) / page_size
}

//! Offset pagination.
//!
//! Pages are numbered from 1. A request for page 0 or a negative page is
//! clamped to page 1 rather than producing a negative skip.

use serde::{Deserialize, Serialize};

/// A request for one page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Creates a page request, clamping `page` to at least 1 and `page_size`
    /// to at least 1.
    pub fn new(page: i64, page_size: u64) -> Self {
        Self {
            page: page.max(1) as u64,
            page_size: page_size.max(1),
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of records to skip.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of records on the page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Number of pages needed for `total` records, `ceil(total / page_size)`.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1))
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// The 1-based page number.
    pub page: u64,
    /// Total number of records across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assembles a page from its items and the collection total.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            total,
            total_pages: total_pages(total, request.page_size()),
        }
    }
}

//! Pagination utilities for list endpoints
//!
//! Pagination is opt-in: it applies when the request carries `page` or
//! `limit` at all, whatever the value. Pages are 1-indexed and are not
//! clamped; a page past the end yields an empty slice with valid metadata.

use pokedex_common::numeric::parse_leading_int;
use serde::Serialize;
use std::ops::Range;

/// Page used when `page` is missing or unusable
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when `limit` is missing or unusable
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Requested page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Build from raw query values; `None` when neither parameter is present
    ///
    /// Missing, unparsable and non-positive values fall back to the defaults.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Option<Self> {
        if page.is_none() && limit.is_none() {
            return None;
        }

        Some(Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(parse_leading_int)
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub current_page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Total number of matching records
    pub total_items: usize,
    /// Page size
    pub items_per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Calculate pagination metadata and the slice range for `request`
///
/// # Examples
/// ```
/// use pokedex_api::pagination::{calculate_pagination, PageRequest};
///
/// // 45 results at 20 per page = 3 pages (20 + 20 + 5)
/// let (p, range) = calculate_pagination(45, PageRequest { page: 3, limit: 20 });
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(range, 40..45);
/// assert!(!p.has_next);
///
/// // Out-of-range pages are empty, not clamped
/// let (p, range) = calculate_pagination(45, PageRequest { page: 9, limit: 20 });
/// assert_eq!(p.current_page, 9);
/// assert!(range.is_empty());
/// ```
pub fn calculate_pagination(total_items: usize, request: PageRequest) -> (Pagination, Range<usize>) {
    let limit = request.limit.max(1);
    let page = request.page.max(1);
    let total_pages = total_items.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit).min(total_items);
    let end = start.saturating_add(limit).min(total_items);

    let pagination = Pagination {
        current_page: page,
        total_pages,
        total_items,
        items_per_page: limit,
        has_next: page < total_pages,
        has_prev: page > 1,
    };

    (pagination, start..end)
}

//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// The window of rows selected by a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// The number of rows to skip before the first row of the page.
    pub offset: u64,
    /// The maximum number of rows in the page.
    pub limit: u64,
}

/// Compute the row window for a page request.
///
/// Missing values fall back to `config` defaults, a page of zero is treated
/// as the first page, and the page size is capped at
/// [PaginationConfig::max_page_size]. The offset is always
/// `(page - 1) * per_page`.
pub fn resolve_page_bounds(
    page: Option<u64>,
    per_page: Option<u64>,
    config: &PaginationConfig,
) -> PageBounds {
    let page = page.unwrap_or(config.default_page).max(1);
    let per_page = per_page
        .unwrap_or(config.default_page_size)
        .min(config.max_page_size);

    PageBounds {
        offset: (page - 1) * per_page,
        limit: per_page,
    }
}

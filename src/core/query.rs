//! Query parameters, search matching and pagination utilities

use serde::{Deserialize, Serialize};

/// Query parameters of the book list
///
/// ```text
/// GET /books/?book-search=dune&page=2
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BookListParams {
    /// Free-text filter on title (substring) or ISBN (exact)
    #[serde(rename = "book-search")]
    pub search: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<usize>,
}

/// Query parameters of the author list
///
/// ```text
/// GET /authors/?authors-search=herb&page=1
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthorListParams {
    /// Free-text filter on first or last name
    #[serde(rename = "authors-search")]
    pub search: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<usize>,
}

/// A search term lowercased as submitted, `None` when empty
///
/// Surrounding whitespace is part of the term.
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

/// Case-insensitive substring match of `term` (already lowercased) in any field
pub fn contains_ci(fields: &[&str], term: &str) -> bool {
    fields.iter().any(|field| field.to_lowercase().contains(term))
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The requested page of items
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,

    /// The search query the list was filtered with, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// Pagination metadata
#[derive(Debug, Serialize, PartialEq)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

impl<T> PaginatedResponse<T> {
    /// Slice an already filtered and ordered list down to one page
    pub fn paginate(items: Vec<T>, page: Option<usize>, limit: usize) -> Self {
        let meta = PaginationMeta::new(page.unwrap_or(1), limit, items.len());
        let start = (meta.page - 1).saturating_mul(meta.limit);
        let data = items.into_iter().skip(start).take(meta.limit).collect();

        Self {
            data,
            pagination: meta,
            search_query: None,
        }
    }

    /// Echo the search query back to the client
    pub fn with_search_query(mut self, query: Option<String>) -> Self {
        self.search_query = query.filter(|q| !q.is_empty());
        self
    }
}

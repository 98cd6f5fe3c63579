use serde::Serialize;

/// Page size used by listings unless a caller asks otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Offset/limit pair applied to list queries. Pages are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// One page of items together with paging metadata for templates.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}

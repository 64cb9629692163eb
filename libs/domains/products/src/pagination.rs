use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed number of records per list page.
pub const PAGE_SIZE: u64 = 20;

/// Offset/limit slice handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Page bookkeeping returned alongside every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Resolve the requested page against a total.
    ///
    /// Missing, non-integer, zero, negative or out-of-range pages all resolve
    /// to page 1. An empty collection still has one (empty) page.
    pub fn resolve(raw_page: Option<&str>, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);

        let current_page = raw_page
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|page| (1..=total_pages).contains(page))
            .unwrap_or(1);

        Self {
            current_page,
            total_pages,
            total_items,
            page_size: PAGE_SIZE,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.current_page - 1) * self.page_size,
            limit: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_of_two_pages() {
        let meta = PaginationMeta::resolve(None, 26);

        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.total_items, 26);
        assert_eq!(meta.page_size, 20);
        assert!(meta.has_next);
        assert!(!meta.has_previous);
        assert_eq!(meta.window(), PageWindow { offset: 0, limit: 20 });
    }

    #[test]
    fn test_last_page() {
        let meta = PaginationMeta::resolve(Some("2"), 26);

        assert_eq!(meta.current_page, 2);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
        assert_eq!(meta.window().offset, 20);
    }

    #[test]
    fn test_invalid_pages_fall_back_to_first() {
        for raw in ["abc", "0", "-3", "3", "1.5", ""] {
            let meta = PaginationMeta::resolve(Some(raw), 26);
            assert_eq!(meta.current_page, 1, "page {raw:?}");
        }
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let meta = PaginationMeta::resolve(Some("1"), 0);

        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.current_page, 1);
        assert!(!meta.has_next);
        assert!(!meta.has_previous);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        assert_eq!(PaginationMeta::resolve(None, 40).total_pages, 2);
        assert_eq!(PaginationMeta::resolve(None, 41).total_pages, 3);
    }
}

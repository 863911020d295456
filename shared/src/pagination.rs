//! Client-side pagination over an already-fetched list.
//!
//! Changing page never triggers a fetch; a [`PaginationWindow`] is derived
//! from the list length every render.

/// Maximum number of page buttons shown at once
pub const PAGE_NUMBER_WINDOW: usize = 5;

/// Default page size used by list screens
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    /// 1-based page index
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PaginationWindow {
    /// A zero page size is treated as one item per page.
    pub fn new(current_page: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Half-open item range `[start, end)` covered by the current page.
    /// Pages past the end yield an empty range.
    pub fn range(&self) -> (usize, usize) {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        (start, end)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.range();
        let end = end.min(items.len());
        let start = start.min(end);
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Move to `page`, clamped into `[1, total_pages]`
    pub fn go_to(&self, page: usize) -> Self {
        let last = self.total_pages().max(1);
        Self {
            current_page: page.clamp(1, last),
            ..*self
        }
    }

    pub fn previous(&self) -> Self {
        self.go_to(self.current_page.saturating_sub(1))
    }

    pub fn next(&self) -> Self {
        self.go_to(self.current_page + 1)
    }

    /// Page numbers to render: all pages when there are at most five,
    /// otherwise a window of five that slides to keep the current page centred
    /// except near either end.
    pub fn page_numbers(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }
        if total <= PAGE_NUMBER_WINDOW {
            return (1..=total).collect();
        }

        let current = self.current_page.min(total);
        let half = PAGE_NUMBER_WINDOW / 2;
        let start = if current <= half + 1 {
            1
        } else if current + half >= total {
            total - PAGE_NUMBER_WINDOW + 1
        } else {
            current - half
        };
        (start..start + PAGE_NUMBER_WINDOW).collect()
    }

    /// "Showing 6-10 of 12" style caption; `None` for an empty list
    pub fn caption(&self) -> Option<String> {
        let (start, end) = self.range();
        if start == end {
            return None;
        }
        Some(format!("Showing {}-{} of {}", start + 1, end, self.total_items))
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_items_five_per_page() {
        let window = PaginationWindow::new(1, 5, 12);
        assert_eq!(window.total_pages(), 3);
        assert_eq!(window.page_numbers(), vec![1, 2, 3]);
        assert_eq!(window.go_to(2).page_numbers(), vec![1, 2, 3]);
        assert_eq!(window.go_to(3).range(), (10, 12));
    }

    #[test]
    fn test_sliding_window_positions() {
        let window = PaginationWindow::new(1, 1, 10);
        assert_eq!(window.page_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(window.go_to(3).page_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(window.go_to(4).page_numbers(), vec![2, 3, 4, 5, 6]);
        assert_eq!(window.go_to(6).page_numbers(), vec![4, 5, 6, 7, 8]);
        assert_eq!(window.go_to(8).page_numbers(), vec![6, 7, 8, 9, 10]);
        assert_eq!(window.go_to(10).page_numbers(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_empty_list() {
        let window = PaginationWindow::new(1, 5, 0);
        assert_eq!(window.total_pages(), 0);
        assert!(window.page_numbers().is_empty());
        assert!(!window.has_next());
        assert!(!window.has_previous());
        assert!(window.caption().is_none());
        let items: Vec<u8> = Vec::new();
        assert!(window.slice(&items).is_empty());
    }

    #[test]
    fn test_out_of_range_page_slices_empty() {
        let items: Vec<u32> = (0..7).collect();
        let window = PaginationWindow::new(5, 5, items.len());
        assert!(window.slice(&items).is_empty());
        assert!(!window.has_next());
    }

    #[test]
    fn test_navigation_clamps() {
        let window = PaginationWindow::new(1, 5, 12);
        assert_eq!(window.previous().current_page, 1);
        assert_eq!(window.next().next().next().current_page, 3);
        assert_eq!(window.go_to(0).current_page, 1);
    }

    #[test]
    fn test_caption() {
        let window = PaginationWindow::new(2, 5, 12);
        assert_eq!(window.caption().as_deref(), Some("Showing 6-10 of 12"));
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let window = PaginationWindow::new(1, 0, 3);
        assert_eq!(window.page_size, 1);
        assert_eq!(window.total_pages(), 3);
    }
}

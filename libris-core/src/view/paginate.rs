//! Paginator and page-number controls

use crate::types::Book;
use serde::Serialize;

/// Number of books shown per page
pub const PAGE_SIZE: usize = 24;

/// Maximum number of page numbers shown in pagination controls
pub const PAGE_WINDOW: u32 = 5;

/// One page of an ordered list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Book>,
    pub total_pages: u32,
}

/// Number of pages needed for `count` items
pub fn total_pages(count: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    count.div_ceil(page_size) as u32
}

/// Clamp `page` into `[1, max(1, total_pages)]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Slice one page out of `books`
///
/// Pages are 1-indexed; out-of-range pages clamp to the nearest valid page.
pub fn paginate(books: &[Book], page: u32, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = total_pages(books.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) as usize * page_size).min(books.len());
    let end = (start + page_size).min(books.len());

    Page {
        items: books[start..end].to_vec(),
        total_pages,
    }
}

/// Page numbers to show in pagination controls
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }

    let start = current_page.saturating_sub(2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    let start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    (start..=end).collect()
}

/// Current page of a paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current: u32,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total pages for a list of `count` items
    pub fn total_pages(&self, count: usize) -> u32 {
        total_pages(count, self.page_size)
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Go back one page, stopping at 1
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    /// Advance one page, stopping at the last page
    pub fn next(&mut self, total_pages: u32) {
        self.current = clamp_page(self.current.saturating_add(1), total_pages);
    }

    /// Jump to `page` if it exists; returns whether the page changed
    pub fn select(&mut self, page: u32, total_pages: u32) -> bool {
        if page == 0 || page > total_pages || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    /// Pull the current page back in range after the list shrank
    pub fn clamp(&mut self, total_pages: u32) {
        self.current = clamp_page(self.current, total_pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(n: usize) -> Vec<Book> {
        (1..=n as i64)
            .map(|id| Book::new(id, format!("Book {}", id), "Author"))
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(24, PAGE_SIZE), 1);
        assert_eq!(total_pages(25, PAGE_SIZE), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_second_page_of_26() {
        let list = books(26);
        let page = paginate(&list, 2, PAGE_SIZE);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 25);
        assert_eq!(page.items[1].id, 26);
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let list = books(26);
        assert_eq!(paginate(&list, 0, PAGE_SIZE).items[0].id, 1);
        assert_eq!(paginate(&list, 9, PAGE_SIZE).items[0].id, 25);

        let empty = paginate(&[], 3, PAGE_SIZE);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(3, 4), vec![1, 2, 3, 4]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = PageState::default();
        assert_eq!(state.page_size(), PAGE_SIZE);

        state.previous();
        assert_eq!(state.current(), 1);

        state.next(3);
        state.next(3);
        state.next(3);
        assert_eq!(state.current(), 3);

        assert!(!state.select(4, 3));
        assert!(!state.select(0, 3));
        assert!(state.select(2, 3));
        assert_eq!(state.current(), 2);

        state.clamp(1);
        assert_eq!(state.current(), 1);

        state.next(0);
        assert_eq!(state.current(), 1);
    }
}

//! Book collection view engine
//!
//! Every listing surface runs the same pipeline over source data:
//! filter, then sort, then paginate. All stages are pure and never fail.

mod filter;
mod paginate;
mod session;
mod sort;

pub use filter::{available_genres, filter_books, filter_books_with, matches, ReadingStatus, Unwired};
pub use paginate::{
    clamp_page, page_window, paginate, total_pages, Page, PageState, PAGE_SIZE, PAGE_WINDOW,
};
pub use session::{LibraryView, PageAction};
pub use sort::{compare_books, compare_text, sort_books, sort_in_place};

use crate::types::{Book, FilterOptions, SortSpec};
use serde::Serialize;

/// One computed page of a filtered, sorted list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    /// Books on the current page
    pub items: Vec<Book>,

    /// Pages in the filtered list
    pub total_pages: u32,

    /// Books that passed the filters
    pub total_count: usize,

    /// Page actually shown after clamping
    pub page: u32,
}

impl BookView {
    /// Page numbers to show for this view
    pub fn page_window(&self) -> Vec<u32> {
        page_window(self.page, self.total_pages)
    }
}

/// Run filter, sort and paginate with the default page size
pub fn compute_view(
    books: &[Book],
    filters: &FilterOptions,
    sort: &SortSpec,
    page: u32,
) -> BookView {
    compute_view_with(books, filters, sort, page, PAGE_SIZE, &Unwired)
}

/// Full pipeline with an explicit page size and reading-state lookup
pub fn compute_view_with(
    books: &[Book],
    filters: &FilterOptions,
    sort: &SortSpec,
    page: u32,
    page_size: usize,
    status: &dyn ReadingStatus,
) -> BookView {
    let mut filtered = filter_books_with(books, filters, status);
    sort_in_place(&mut filtered, sort);

    let total_count = filtered.len();
    let total_pages = total_pages(total_count, page_size);
    let page = clamp_page(page, total_pages);
    let Page { items, .. } = paginate(&filtered, page, page_size);

    BookView {
        items,
        total_pages,
        total_count,
        page,
    }
}

//! Stateful view over a book list: search, filters, sort and current page

use super::{compute_view_with, BookView, PageState, ReadingStatus};
use crate::types::{Book, FilterOptions, FilterPreset, SortField, SortSpec};
use serde::Deserialize;
use std::sync::Arc;

/// Page navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum PageAction {
    Next,
    Previous,
    Select { page: u32 },
}

/// Last computed view and the inputs it was computed from
#[derive(Debug, Clone)]
struct Memo {
    books: Arc<Vec<Book>>,
    filters: FilterOptions,
    sort: SortSpec,
    page: u32,
    revision: u64,
    view: BookView,
}

/// View state for one listing surface
///
/// Changing the search query, the filters or the sort order sends the view
/// back to page 1. The last computed view is reused while the book list
/// (by identity), the options and the reading state are unchanged.
#[derive(Debug, Clone, Default)]
pub struct LibraryView {
    search: String,
    filters: FilterOptions,
    sort: SortSpec,
    page: PageState,
    memo: Option<Memo>,
}

impl LibraryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page.current()
    }

    /// Search query to send to the source, `None` when no search is active
    pub fn active_query(&self) -> Option<&str> {
        let query = self.search.trim();
        (!query.is_empty()).then_some(query)
    }

    /// Returns whether the query changed
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.search {
            return false;
        }
        self.search = query;
        self.page.reset();
        true
    }

    /// Returns whether the filters changed
    pub fn set_filters(&mut self, filters: FilterOptions) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.page.reset();
        true
    }

    /// Apply a quick filter on top of the current filters
    pub fn apply_preset(&mut self, preset: FilterPreset) -> bool {
        let filters = self.filters.clone().with_preset(preset);
        self.set_filters(filters)
    }

    /// Drop every filter
    pub fn clear_filters(&mut self) -> bool {
        self.set_filters(FilterOptions::default())
    }

    /// Returns whether the sort changed
    pub fn set_sort(&mut self, sort: SortSpec) -> bool {
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.page.reset();
        true
    }

    /// Sort-header click on `field`
    pub fn toggle_sort(&mut self, field: SortField) {
        let sort = self.sort.toggle(field);
        self.set_sort(sort);
    }

    /// Flip the direction of the current sort
    pub fn reverse_sort(&mut self) {
        let sort = self.sort.reversed();
        self.set_sort(sort);
    }

    /// Move to another page of a list with `total_pages` pages
    pub fn navigate(&mut self, action: PageAction, total_pages: u32) {
        match action {
            PageAction::Next => self.page.next(total_pages),
            PageAction::Previous => self.page.previous(),
            PageAction::Select { page } => {
                self.page.select(page, total_pages);
            }
        }
    }

    /// Compute the current page of `books`
    ///
    /// The stored page is clamped to the result so a shrinking list never
    /// leaves the view on an empty page.
    pub fn compute(&mut self, books: &Arc<Vec<Book>>, status: &dyn ReadingStatus) -> BookView {
        let revision = status.revision();

        if let Some(memo) = &self.memo {
            if Arc::ptr_eq(&memo.books, books)
                && memo.filters == self.filters
                && memo.sort == self.sort
                && memo.page == self.page.current()
                && memo.revision == revision
            {
                return memo.view.clone();
            }
        }

        let view = compute_view_with(
            books,
            &self.filters,
            &self.sort,
            self.page.current(),
            self.page.page_size(),
            status,
        );
        self.page.clamp(view.total_pages);

        self.memo = Some(Memo {
            books: Arc::clone(books),
            filters: self.filters.clone(),
            sort: self.sort,
            page: self.page.current(),
            revision,
            view: view.clone(),
        });
        view
    }
}

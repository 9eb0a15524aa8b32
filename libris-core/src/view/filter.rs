//! Filter engine

use crate::types::{Book, BookId, FilterOptions, ReadStatus};
use std::collections::BTreeSet;

/// Lookup of per-book reading state used by the read-status dimension
///
/// `None` means the lookup has no data for that question, which leaves the
/// dimension unconstrained.
pub trait ReadingStatus {
    fn is_read(&self, id: BookId) -> Option<bool>;

    fn is_to_read(&self, id: BookId) -> Option<bool>;

    /// Changes whenever the answers may have changed
    fn revision(&self) -> u64 {
        0
    }
}

/// Status lookup with no backing data
#[derive(Debug, Clone, Copy, Default)]
pub struct Unwired;

impl ReadingStatus for Unwired {
    fn is_read(&self, _id: BookId) -> Option<bool> {
        None
    }

    fn is_to_read(&self, _id: BookId) -> Option<bool> {
        None
    }
}

/// Keep the books matching every set dimension, in input order
///
/// The read-status dimension is ignored; use [`filter_books_with`] to supply
/// reading state.
pub fn filter_books(books: &[Book], opts: &FilterOptions) -> Vec<Book> {
    filter_books_with(books, opts, &Unwired)
}

/// Like [`filter_books`], resolving read status through `status`
pub fn filter_books_with(
    books: &[Book],
    opts: &FilterOptions,
    status: &dyn ReadingStatus,
) -> Vec<Book> {
    books
        .iter()
        .filter(|book| matches(book, opts, status))
        .cloned()
        .collect()
}

/// Whether a single book passes all set constraints
pub fn matches(book: &Book, opts: &FilterOptions, status: &dyn ReadingStatus) -> bool {
    if let Some(genre) = &opts.genre {
        if book.genre.as_deref() != Some(genre.as_str()) {
            return false;
        }
    }

    if let Some(min_rating) = opts.rating {
        match book.rating {
            Some(rating) if rating >= min_rating => {}
            _ => return false,
        }
    }

    // A present range, even an empty one, requires a year
    if let Some(range) = &opts.publication_year {
        let Some(year) = book.publication_year else {
            return false;
        };
        if range.start.is_some_and(|start| year < start) {
            return false;
        }
        if range.end.is_some_and(|end| year > end) {
            return false;
        }
    }

    match opts.read_status.unwrap_or_default() {
        ReadStatus::All => true,
        ReadStatus::Read => status.is_read(book.id).unwrap_or(true),
        ReadStatus::Unread => status.is_read(book.id).map_or(true, |read| !read),
        ReadStatus::ToRead => status.is_to_read(book.id).unwrap_or(true),
    }
}

/// Distinct genres present in `books`, sorted
pub fn available_genres(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .filter_map(|book| book.genre.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

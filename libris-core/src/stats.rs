//! Library statistics

use crate::store::ReadingLists;
use crate::types::Book;
use crate::view::{available_genres, ReadingStatus};
use serde::Serialize;

/// Counts shown on the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub books_read: usize,
    pub to_read: usize,
    pub genres: usize,
}

impl LibraryStats {
    /// Summarize `books` against the user's lists
    ///
    /// Only catalog books count as read; the to-read count is the whole list
    /// since entries are kept even after the source drops them.
    pub fn collect(books: &[Book], lists: &ReadingLists<'_>) -> Self {
        Self {
            total_books: books.len(),
            books_read: books
                .iter()
                .filter(|b| lists.is_read(b.id).unwrap_or(false))
                .count(),
            to_read: lists.to_read.len(),
            genres: available_genres(books).len(),
        }
    }
}

//! Core types for the Libris catalog and view options

mod book;
mod options;

pub use book::{parse_book_id, Book, BookId, NewBook};
pub use options::{FilterOptions, FilterPreset, ReadStatus, SortDirection, SortField, SortSpec, YearRange};

//! Libris Core Library
//!
//! This crate provides the catalog types, the book collection view engine
//! (filter, sort, paginate) and the persisted reading lists used by the
//! Libris server and CLI. Catalog data comes from a [`BookSource`]; user
//! state is written through a [`KeyValueStore`].

pub mod error;
pub mod source;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

pub use error::{LibrisError, Result, SourceError, StorageError};
pub use source::{fetch_books, BookSource, FetchState, MemorySource};
pub use stats::LibraryStats;
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
pub use store::{Preferences, ReadStateStore, ReadingLists, Shelves, Theme, ToReadStore};
pub use types::{
    parse_book_id, Book, BookId, FilterOptions, FilterPreset, NewBook, ReadStatus, SortDirection,
    SortField, SortSpec, YearRange,
};
pub use view::{compute_view, BookView, LibraryView, PageAction, PAGE_SIZE};

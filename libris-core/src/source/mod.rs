//! Book source abstraction
//!
//! A [`BookSource`] is the typed client of the book API. The view engine only
//! needs listing and title search; the remaining operations are passed
//! through for detail and editing surfaces.

mod memory;

pub use memory::MemorySource;

use crate::error::SourceError;
use crate::types::{Book, BookId, NewBook};
use async_trait::async_trait;

/// Result type for source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Supplier of catalog data
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Every book in the catalog
    async fn list_books(&self) -> SourceResult<Vec<Book>>;

    /// Books whose title contains `title`
    async fn search_books(&self, title: &str) -> SourceResult<Vec<Book>>;

    /// Books whose author contains `author`
    async fn search_by_author(&self, author: &str) -> SourceResult<Vec<Book>> {
        let needle = author.to_lowercase();
        Ok(self
            .list_books()
            .await?
            .into_iter()
            .filter(|b| b.author.to_lowercase().contains(&needle))
            .collect())
    }

    /// A single book; `SourceError::NotFound` if the id is unknown
    async fn get_book(&self, id: BookId) -> SourceResult<Book>;

    /// Create a book and return its new id
    async fn create_book(&self, book: NewBook) -> SourceResult<BookId>;

    /// Replace the fields of an existing book
    async fn update_book(&self, id: BookId, book: NewBook) -> SourceResult<()>;

    /// Delete a book
    async fn delete_book(&self, id: BookId) -> SourceResult<()>;
}

/// Observable state of an asynchronous fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Pending,
    Failed(String),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Self::Ready(data) => Ok(data),
            Self::Failed(message) => Err(message),
            Self::Pending => Err("request still pending".to_string()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Pending => FetchState::Pending,
            Self::Failed(message) => FetchState::Failed(message),
            Self::Ready(data) => FetchState::Ready(f(data)),
        }
    }
}

impl<T> From<SourceResult<T>> for FetchState<T> {
    fn from(result: SourceResult<T>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Raw books for a listing surface
///
/// A non-blank `query` searches by title; otherwise the full catalog is
/// listed.
pub async fn fetch_books(source: &dyn BookSource, query: Option<&str>) -> FetchState<Vec<Book>> {
    let result = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => source.search_books(query).await,
        None => source.list_books().await,
    };

    if let Err(e) = &result {
        tracing::warn!("Book fetch failed: {}", e);
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that is always down
    struct Offline;

    #[async_trait]
    impl BookSource for Offline {
        async fn list_books(&self) -> SourceResult<Vec<Book>> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }

        async fn search_books(&self, _title: &str) -> SourceResult<Vec<Book>> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }

        async fn get_book(&self, id: BookId) -> SourceResult<Book> {
            Err(SourceError::NotFound(id))
        }

        async fn create_book(&self, _book: NewBook) -> SourceResult<BookId> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }

        async fn update_book(&self, _id: BookId, _book: NewBook) -> SourceResult<()> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }

        async fn delete_book(&self, _id: BookId) -> SourceResult<()> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }
    }

    fn source() -> MemorySource {
        MemorySource::from_books(vec![
            Book::new(1, "The Hobbit", "J.R.R. Tolkien"),
            Book::new(2, "Hobbit Hole Living", "B. Baggins"),
            Book::new(3, "Dracula", "Bram Stoker"),
        ])
    }

    #[tokio::test]
    async fn test_fetch_uses_search_only_for_non_blank_query() {
        let source = source();

        let all = fetch_books(&source, None).await;
        assert_eq!(all.data().map(Vec::len), Some(3));

        let blank = fetch_books(&source, Some("  ")).await;
        assert_eq!(blank.data().map(Vec::len), Some(3));

        let found = fetch_books(&source, Some("hobbit")).await;
        let ids: Vec<BookId> = found.data().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_a_state() {
        let state = fetch_books(&Offline, None).await;
        assert_eq!(
            state,
            FetchState::Failed("Source unavailable: connection refused".to_string())
        );
        assert!(state.data().is_none());
        assert!(state.into_result().is_err());
    }

    #[tokio::test]
    async fn test_default_author_search() {
        struct Fixed(Vec<Book>);

        #[async_trait]
        impl BookSource for Fixed {
            async fn list_books(&self) -> SourceResult<Vec<Book>> {
                Ok(self.0.clone())
            }
            async fn search_books(&self, _title: &str) -> SourceResult<Vec<Book>> {
                Ok(Vec::new())
            }
            async fn get_book(&self, id: BookId) -> SourceResult<Book> {
                Err(SourceError::NotFound(id))
            }
            async fn create_book(&self, _book: NewBook) -> SourceResult<BookId> {
                Ok(0)
            }
            async fn update_book(&self, _id: BookId, _book: NewBook) -> SourceResult<()> {
                Ok(())
            }
            async fn delete_book(&self, _id: BookId) -> SourceResult<()> {
                Ok(())
            }
        }

        let source = Fixed(vec![
            Book::new(1, "Emma", "Jane Austen"),
            Book::new(2, "Dune", "Frank Herbert"),
        ]);
        let found = source.search_by_author("AUSTEN").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_fetch_state_map() {
        let state: FetchState<Vec<u8>> = FetchState::Pending;
        assert!(state.map(|v| v.len()).is_pending());

        let state = FetchState::Ready(vec![1, 2]).map(|v| v.len());
        assert_eq!(state, FetchState::Ready(2));
    }
}

//! Persisted to-read list

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::{Book, BookId};
use std::sync::Arc;

/// Storage key holding the JSON array of to-read books
pub const TO_READ_KEY: &str = "libris-to-read";

/// Books the user intends to read, in the order they were added
///
/// Entries are full book records so the list renders without the source.
/// The whole list is written back to storage after every mutation.
pub struct ToReadStore {
    storage: Arc<dyn KeyValueStore>,
    books: Vec<Book>,
    revision: u64,
}

impl ToReadStore {
    /// Load the persisted list
    ///
    /// Unreadable or malformed data is logged and replaced by an empty list.
    pub fn initialize(storage: Arc<dyn KeyValueStore>) -> Self {
        let books = match storage.get(TO_READ_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<Vec<Book>>(&data) {
                Ok(mut books) => {
                    dedup_by_id(&mut books);
                    books
                }
                Err(e) => {
                    tracing::warn!("Discarding malformed to-read list: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read to-read list, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            storage,
            books,
            revision: 0,
        }
    }

    /// Append `book` unless a book with the same id is already listed
    ///
    /// Returns whether the list changed. If persisting fails the list is
    /// left as it was.
    pub fn add(&mut self, book: Book) -> Result<bool> {
        if self.contains(book.id) {
            return Ok(false);
        }

        let id = book.id;
        self.books.push(book);
        if let Err(e) = self.persist() {
            self.books.pop();
            return Err(e);
        }

        self.revision += 1;
        tracing::debug!(id, count = self.books.len(), "Added book to to-read list");
        Ok(true)
    }

    /// Remove the book with `id` if listed; returns whether the list changed
    pub fn remove(&mut self, id: BookId) -> Result<bool> {
        let Some(index) = self.books.iter().position(|b| b.id == id) else {
            return Ok(false);
        };

        let removed = self.books.remove(index);
        if let Err(e) = self.persist() {
            self.books.insert(index, removed);
            return Err(e);
        }

        self.revision += 1;
        tracing::debug!(id, count = self.books.len(), "Removed book from to-read list");
        Ok(true)
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    /// Snapshot of the list in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Borrowed view of the list
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Incremented on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn persist(&self) -> Result<()> {
        let data = serde_json::to_string(&self.books)?;
        self.storage.set(TO_READ_KEY, &data)?;
        Ok(())
    }
}

fn dedup_by_id(books: &mut Vec<Book>) {
    let mut seen = std::collections::HashSet::new();
    books.retain(|b| seen.insert(b.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LibrisError, StorageError};
    use crate::storage::{MemoryStorage, StorageResult};

    fn book(id: BookId, title: &str) -> Book {
        Book::new(id, title, "Author")
    }

    fn stored(storage: &MemoryStorage) -> Vec<Book> {
        let data = storage.get(TO_READ_KEY).unwrap().unwrap();
        serde_json::from_str(&data).unwrap()
    }

    /// Storage whose writes always fail
    struct ReadOnly(MemoryStorage);

    impl KeyValueStore for ReadOnly {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::PermissionDenied("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::PermissionDenied("read-only".to_string()))
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            self.0.keys()
        }
    }

    #[test]
    fn test_starts_empty_without_data() {
        let store = ToReadStore::initialize(Arc::new(MemoryStorage::new()));
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ToReadStore::initialize(storage.clone());

        assert!(store.add(book(1, "Dune")).unwrap());
        assert!(!store.add(book(1, "Dune (reprint)")).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].title, "Dune");
        assert_eq!(stored(&storage).len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ToReadStore::initialize(storage.clone());
        store.add(book(1, "Dune")).unwrap();
        store.add(book(2, "Emma")).unwrap();

        assert!(store.remove(1).unwrap());
        assert!(!store.remove(1).unwrap());
        assert!(!store.contains(1));
        assert!(store.contains(2));
        assert_eq!(stored(&storage), vec![book(2, "Emma")]);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut store = ToReadStore::initialize(Arc::new(MemoryStorage::new()));
        for (id, title) in [(5, "E"), (2, "B"), (9, "I")] {
            store.add(book(id, title)).unwrap();
        }
        let order: Vec<BookId> = store.books().iter().map(|b| b.id).collect();
        assert_eq!(order, vec![5, 2, 9]);
        assert_eq!(store.list(), store.books());
    }

    #[test]
    fn test_reload_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = ToReadStore::initialize(storage.clone());
            store.add(book(3, "Mid").with_rating(4.0)).unwrap();
            store.add(book(1, "Alpha")).unwrap();
        }

        let store = ToReadStore::initialize(storage);
        assert_eq!(store.list(), vec![book(3, "Mid").with_rating(4.0), book(1, "Alpha")]);
    }

    #[test]
    fn test_malformed_data_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TO_READ_KEY, "{not json").unwrap();

        let mut store = ToReadStore::initialize(storage.clone());
        assert!(store.is_empty());

        // The next mutation overwrites the bad data
        store.add(book(1, "Dune")).unwrap();
        assert_eq!(stored(&storage).len(), 1);
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let inner = MemoryStorage::new();
        inner
            .set(TO_READ_KEY, &serde_json::to_string(&vec![book(1, "Dune")]).unwrap())
            .unwrap();
        let mut store = ToReadStore::initialize(Arc::new(ReadOnly(inner)));

        assert!(matches!(
            store.add(book(2, "Emma")),
            Err(LibrisError::Storage(StorageError::PermissionDenied(_)))
        ));
        assert!(!store.contains(2));

        assert!(store.remove(1).is_err());
        assert!(store.contains(1));
        assert_eq!(store.revision(), 0);
    }
}

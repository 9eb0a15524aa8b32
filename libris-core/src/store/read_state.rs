//! Persisted set of books marked as read

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::BookId;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Storage key holding the JSON array of read book ids
pub const READ_KEY: &str = "libris-read";

/// Ids of the books the user has finished
pub struct ReadStateStore {
    storage: Arc<dyn KeyValueStore>,
    read: BTreeSet<BookId>,
    revision: u64,
}

impl ReadStateStore {
    /// Load the persisted set; malformed data is logged and dropped
    pub fn initialize(storage: Arc<dyn KeyValueStore>) -> Self {
        let read = match storage.get(READ_KEY) {
            Ok(Some(data)) => serde_json::from_str(&data).unwrap_or_else(|e| {
                tracing::warn!("Discarding malformed read list: {}", e);
                BTreeSet::new()
            }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!("Failed to read read list, starting empty: {}", e);
                BTreeSet::new()
            }
        };

        Self {
            storage,
            read,
            revision: 0,
        }
    }

    /// Returns whether the state changed
    pub fn mark_read(&mut self, id: BookId) -> Result<bool> {
        if !self.read.insert(id) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            self.read.remove(&id);
            return Err(e);
        }
        self.revision += 1;
        tracing::debug!(id, "Marked book as read");
        Ok(true)
    }

    /// Returns whether the state changed
    pub fn mark_unread(&mut self, id: BookId) -> Result<bool> {
        if !self.read.remove(&id) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            self.read.insert(id);
            return Err(e);
        }
        self.revision += 1;
        tracing::debug!(id, "Marked book as unread");
        Ok(true)
    }

    /// Flip the state of `id`; returns the new state
    pub fn toggle(&mut self, id: BookId) -> Result<bool> {
        if self.is_read(id) {
            self.mark_unread(id)?;
            Ok(false)
        } else {
            self.mark_read(id)?;
            Ok(true)
        }
    }

    pub fn is_read(&self, id: BookId) -> bool {
        self.read.contains(&id)
    }

    /// Read ids in ascending order
    pub fn ids(&self) -> Vec<BookId> {
        self.read.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn persist(&self) -> Result<()> {
        let data = serde_json::to_string(&self.read)?;
        self.storage.set(READ_KEY, &data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_mark_and_unmark() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ReadStateStore::initialize(storage.clone());

        assert!(store.mark_read(4).unwrap());
        assert!(!store.mark_read(4).unwrap());
        assert!(store.mark_read(2).unwrap());
        assert_eq!(store.ids(), vec![2, 4]);
        assert_eq!(storage.get(READ_KEY).unwrap().as_deref(), Some("[2,4]"));

        assert!(store.mark_unread(4).unwrap());
        assert!(!store.mark_unread(4).unwrap());
        assert!(!store.is_read(4));
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_toggle() {
        let mut store = ReadStateStore::initialize(Arc::new(MemoryStorage::new()));
        assert!(store.toggle(7).unwrap());
        assert!(store.is_read(7));
        assert!(!store.toggle(7).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_and_malformed_data() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(READ_KEY, "[3, 1]").unwrap();
        let store = ReadStateStore::initialize(storage.clone());
        assert_eq!(store.ids(), vec![1, 3]);

        storage.set(READ_KEY, "\"oops\"").unwrap();
        let store = ReadStateStore::initialize(storage);
        assert!(store.is_empty());
    }
}

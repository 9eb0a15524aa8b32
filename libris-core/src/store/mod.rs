//! Client-side state that outlives a session

mod preferences;
mod read_state;
mod to_read;

pub use preferences::{Preferences, Theme, THEME_KEY};
pub use read_state::{ReadStateStore, READ_KEY};
pub use to_read::{ToReadStore, TO_READ_KEY};

use crate::storage::KeyValueStore;
use crate::types::BookId;
use crate::view::ReadingStatus;
use std::sync::Arc;

/// All persisted user state, owned by one composition root
pub struct Shelves {
    pub to_read: ToReadStore,
    pub read: ReadStateStore,
    pub preferences: Preferences,
}

impl Shelves {
    /// Load every store from `storage`
    pub fn initialize(storage: Arc<dyn KeyValueStore>, system_theme: Theme) -> Self {
        Self {
            to_read: ToReadStore::initialize(Arc::clone(&storage)),
            read: ReadStateStore::initialize(Arc::clone(&storage)),
            preferences: Preferences::initialize(storage, system_theme),
        }
    }

    /// Reading-state lookup backed by these stores
    pub fn status(&self) -> ReadingLists<'_> {
        ReadingLists {
            to_read: &self.to_read,
            read: &self.read,
        }
    }
}

/// Reading-state lookup over the to-read and read stores
#[derive(Clone, Copy)]
pub struct ReadingLists<'a> {
    pub to_read: &'a ToReadStore,
    pub read: &'a ReadStateStore,
}

impl ReadingStatus for ReadingLists<'_> {
    fn is_read(&self, id: BookId) -> Option<bool> {
        Some(self.read.is_read(id))
    }

    fn is_to_read(&self, id: BookId) -> Option<bool> {
        Some(self.to_read.contains(id))
    }

    fn revision(&self) -> u64 {
        self.to_read.revision() + self.read.revision()
    }
}

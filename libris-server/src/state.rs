//! Application state

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use libris_core::{
    Book, BookId, BookSource, KeyValueStore, LibraryView, LocalStorage, MemorySource, Shelves,
    Theme,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog the listings are computed from
    pub source: Arc<dyn BookSource>,

    /// Persisted to-read list, read marks and preferences
    pub shelves: Arc<RwLock<Shelves>>,

    /// Server-side view session backing `/view`
    pub view: Arc<RwLock<ViewSession>>,

    /// Bumped whenever the server changes the catalog
    catalog_revision: Arc<AtomicU64>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// The `/view` session and the catalog snapshot it was last computed from
#[derive(Debug, Default)]
pub struct ViewSession {
    pub view: LibraryView,
    books: Option<CachedBooks>,
}

#[derive(Debug)]
struct CachedBooks {
    query: Option<String>,
    catalog_revision: u64,
    books: Arc<Vec<Book>>,
}

impl ViewSession {
    /// Books fetched earlier for `query`, unless the catalog changed since
    pub fn cached_books(
        &self,
        query: Option<&str>,
        catalog_revision: u64,
    ) -> Option<Arc<Vec<Book>>> {
        self.books
            .as_ref()
            .filter(|c| c.catalog_revision == catalog_revision && c.query.as_deref() == query)
            .map(|c| Arc::clone(&c.books))
    }

    /// Remember the books fetched for `query`
    pub fn store_books(
        &mut self,
        query: Option<&str>,
        catalog_revision: u64,
        books: Arc<Vec<Book>>,
    ) {
        self.books = Some(CachedBooks {
            query: query.map(str::to_string),
            catalog_revision,
            books,
        });
    }
}

/// Server-sent events
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// A book was added to the catalog
    BookCreated { id: BookId, title: String },

    /// A book was removed from the catalog
    BookDeleted { id: BookId },

    /// A book was put on the to-read list
    ToReadAdded { id: BookId, title: String },

    /// A book was taken off the to-read list
    ToReadRemoved { id: BookId },

    /// A book was marked read or unread
    ReadStatusChanged { id: BookId, read: bool },

    /// The theme preference changed
    ThemeChanged { theme: Theme },

    /// An error occurred
    Error { message: String },
}

impl AppState {
    /// Create application state from server settings
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let storage = LocalStorage::open(&config.data_path).with_context(|| {
            format!("Failed to open data directory {}", config.data_path.display())
        })?;
        tracing::info!(root = %storage.root().display(), "Opened data directory");

        let source = match &config.catalog {
            Some(path) => MemorySource::load(path)
                .await
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => {
                tracing::warn!("No catalog configured, starting with an empty library");
                MemorySource::new()
            }
        };

        Ok(Self::from_parts(Arc::new(source), Arc::new(storage)))
    }

    /// Assemble state around an existing source and store
    pub fn from_parts(source: Arc<dyn BookSource>, storage: Arc<dyn KeyValueStore>) -> Self {
        let shelves = Shelves::initialize(storage, Theme::Light);
        let (event_tx, _) = broadcast::channel(100);

        Self {
            source,
            shelves: Arc::new(RwLock::new(shelves)),
            view: Arc::new(RwLock::new(ViewSession::default())),
            catalog_revision: Arc::new(AtomicU64::new(0)),
            event_tx,
        }
    }

    pub fn catalog_revision(&self) -> u64 {
        self.catalog_revision.load(Ordering::Acquire)
    }

    /// Invalidate catalog snapshots after a create, update or delete
    pub fn catalog_changed(&self) {
        self.catalog_revision.fetch_add(1, Ordering::AcqRel);
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::MemoryStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_with_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = temp_dir.path().join("catalog.json");
        tokio::fs::write(&catalog, r#"[{"id": 1, "title": "Dune", "author": "Frank Herbert"}]"#)
            .await
            .unwrap();

        let config = ServerConfig {
            data_path: temp_dir.path().join("data"),
            catalog: Some(catalog),
            ..Default::default()
        };
        let state = AppState::new(&config).await.unwrap();

        assert_eq!(state.source.list_books().await.unwrap().len(), 1);
        assert!(config.data_path.is_dir());
    }

    #[tokio::test]
    async fn test_new_with_missing_catalog_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig {
            data_path: temp_dir.path().to_path_buf(),
            catalog: Some(temp_dir.path().join("nope.json")),
            ..Default::default()
        };
        assert!(AppState::new(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let state = AppState::from_parts(
            Arc::new(MemorySource::new()),
            Arc::new(MemoryStorage::new()),
        );
        let mut rx = state.subscribe();

        state.broadcast(ServerEvent::ToReadRemoved { id: 3 });
        assert_eq!(rx.recv().await.unwrap(), ServerEvent::ToReadRemoved { id: 3 });
    }

    #[test]
    fn test_cached_books_keyed_by_query_and_revision() {
        let mut session = ViewSession::default();
        let books = Arc::new(vec![Book::new(1, "Dune", "Frank Herbert")]);
        assert!(session.cached_books(None, 0).is_none());

        session.store_books(Some("dune"), 0, Arc::clone(&books));
        let cached = session.cached_books(Some("dune"), 0).unwrap();
        assert!(Arc::ptr_eq(&cached, &books));

        assert!(session.cached_books(None, 0).is_none());
        assert!(session.cached_books(Some("dune"), 1).is_none());
    }

    #[test]
    fn test_catalog_changed_bumps_revision() {
        let state = AppState::from_parts(
            Arc::new(MemorySource::new()),
            Arc::new(MemoryStorage::new()),
        );
        let copy = state.clone();

        assert_eq!(state.catalog_revision(), 0);
        copy.catalog_changed();
        assert_eq!(state.catalog_revision(), 1);
    }
}

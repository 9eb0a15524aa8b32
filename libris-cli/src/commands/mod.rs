//! CLI command implementations

mod list;
mod reading;
mod settings;
mod show;

pub use list::{genres, list, ListArgs};
pub use reading::{mark_read, mark_unread, to_read_add, to_read_list, to_read_remove};
pub use settings::{stats, theme};
pub use show::show;

use anyhow::{Context, Result};
use libris_core::{LocalStorage, MemorySource, Shelves, Theme};
use std::path::PathBuf;
use std::sync::Arc;

/// Where a command finds the catalog and the user's lists
pub struct Workspace {
    catalog: Option<PathBuf>,
    data_dir: PathBuf,
}

impl Workspace {
    pub fn new(catalog: Option<PathBuf>, data_dir: PathBuf) -> Self {
        Self { catalog, data_dir }
    }

    /// Load the catalog file
    pub async fn source(&self) -> Result<MemorySource> {
        let path = self
            .catalog
            .as_deref()
            .context("No catalog given; pass --catalog or set LIBRIS_CATALOG")?;

        MemorySource::load(path)
            .await
            .with_context(|| format!("Failed to load catalog {}", path.display()))
    }

    /// Open the persisted lists and settings
    pub fn shelves(&self) -> Result<Shelves> {
        let storage = LocalStorage::open(&self.data_dir).with_context(|| {
            format!("Failed to open data directory {}", self.data_dir.display())
        })?;
        tracing::debug!(root = %storage.root().display(), "Opened data directory");
        Ok(Shelves::initialize(Arc::new(storage), Theme::Light))
    }
}

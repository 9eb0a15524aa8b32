//! In-memory book catalog

use super::{BookSource, SourceResult};
use crate::error::SourceError;
use crate::types::{Book, BookId, NewBook};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::RwLock;

#[derive(Debug)]
struct Catalog {
    books: Vec<Book>,

    /// `None` once the id space is used up
    next_id: Option<BookId>,
}

/// Catalog held in memory, optionally seeded from a JSON file
#[derive(Debug)]
pub struct MemorySource {
    catalog: RwLock<Catalog>,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySource {
    pub fn new() -> Self {
        Self::from_books(Vec::new())
    }

    /// Seed the catalog; new ids continue after the largest seed id
    pub fn from_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0).checked_add(1);
        Self {
            catalog: RwLock::new(Catalog { books, next_id }),
        }
    }

    /// Parse a JSON array of book records
    pub fn from_json(data: &str) -> SourceResult<Self> {
        let books: Vec<Book> =
            serde_json::from_str(data).map_err(|e| SourceError::InvalidCatalog(e.to_string()))?;

        let mut seen = HashSet::new();
        if let Some(dup) = books.iter().find(|b| !seen.insert(b.id)) {
            return Err(SourceError::InvalidCatalog(format!(
                "duplicate book id {}",
                dup.id
            )));
        }

        Ok(Self::from_books(books))
    }

    /// Load a catalog file
    pub async fn load(path: &Path) -> SourceResult<Self> {
        let data = tokio::fs::read_to_string(path).await.map_err(|e| {
            SourceError::Unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let source = Self::from_json(&data)?;
        tracing::info!(path = %path.display(), books = source.len(), "Loaded catalog");
        Ok(source)
    }

    /// Number of books in the catalog
    pub fn len(&self) -> usize {
        self.catalog.read().map(|c| c.books.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<T>(&self, f: impl FnOnce(&Catalog) -> T) -> SourceResult<T> {
        let guard = self
            .catalog
            .read()
            .map_err(|_| SourceError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> SourceResult<T> {
        let mut guard = self
            .catalog
            .write()
            .map_err(|_| SourceError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl BookSource for MemorySource {
    async fn list_books(&self) -> SourceResult<Vec<Book>> {
        self.read(|c| c.books.clone())
    }

    async fn search_books(&self, title: &str) -> SourceResult<Vec<Book>> {
        self.read(|c| {
            c.books
                .iter()
                .filter(|b| contains_ignore_case(&b.title, title))
                .cloned()
                .collect()
        })
    }

    async fn search_by_author(&self, author: &str) -> SourceResult<Vec<Book>> {
        self.read(|c| {
            c.books
                .iter()
                .filter(|b| contains_ignore_case(&b.author, author))
                .cloned()
                .collect()
        })
    }

    async fn get_book(&self, id: BookId) -> SourceResult<Book> {
        self.read(|c| c.books.iter().find(|b| b.id == id).cloned())?
            .ok_or(SourceError::NotFound(id))
    }

    async fn create_book(&self, book: NewBook) -> SourceResult<BookId> {
        self.write(|c| {
            let id = c
                .next_id
                .ok_or_else(|| SourceError::Unavailable("book ids exhausted".to_string()))?;
            c.books.push(Book::from_new(id, book));
            c.next_id = id.checked_add(1);
            Ok(id)
        })?
    }

    async fn update_book(&self, id: BookId, book: NewBook) -> SourceResult<()> {
        self.write(|c| match c.books.iter_mut().find(|b| b.id == id) {
            Some(existing) => {
                *existing = Book::from_new(id, book);
                Ok(())
            }
            None => Err(SourceError::NotFound(id)),
        })?
    }

    async fn delete_book(&self, id: BookId) -> SourceResult<()> {
        self.write(|c| match c.books.iter().position(|b| b.id == id) {
            Some(index) => {
                c.books.remove(index);
                Ok(())
            }
            None => Err(SourceError::NotFound(id)),
        })?
    }
}

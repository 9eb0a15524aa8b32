//! Stateful view session handlers

use super::ApiError;
use crate::state::{AppState, ViewSession};
use axum::{extract::State, http::StatusCode, Json};
use libris_core::view::available_genres;
use libris_core::{
    fetch_books, Book, BookView, FilterOptions, FilterPreset, LibraryView, PageAction, SortField,
    SortSpec,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Current view state and its computed page
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub search: String,
    pub filters: FilterOptions,
    pub sort: SortSpec,
    pub books: Vec<Book>,
    pub total: usize,
    pub total_pages: u32,
    pub page: u32,
    pub page_window: Vec<u32>,
    pub genres: Vec<String>,
}

impl ViewResponse {
    fn new(session: &LibraryView, view: BookView, genres: Vec<String>) -> Self {
        Self {
            search: session.search().to_string(),
            filters: session.filters().clone(),
            sort: session.sort(),
            page_window: view.page_window(),
            total: view.total_count,
            total_pages: view.total_pages,
            page: view.page,
            books: view.items,
            genres,
        }
    }
}

/// Changes to apply to the view session
///
/// Absent fields are left alone. Any effective change to the search,
/// filters or sort returns the session to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct ViewUpdate {
    pub search: Option<String>,
    pub filters: Option<FilterOptions>,

    /// Quick filter merged into the filters after they are set
    pub preset: Option<FilterPreset>,

    pub sort: Option<SortSpec>,

    /// Sort by a column header: re-selecting the ascending field flips it
    pub toggle_sort: Option<SortField>,

    #[serde(default)]
    pub clear_filters: bool,
}

impl ViewUpdate {
    fn apply(self, session: &mut LibraryView) {
        if let Some(search) = self.search {
            session.set_search(search);
        }
        if self.clear_filters {
            session.clear_filters();
        }
        if let Some(filters) = self.filters {
            session.set_filters(filters);
        }
        if let Some(preset) = self.preset {
            session.apply_preset(preset);
        }
        if let Some(sort) = self.sort {
            session.set_sort(sort);
        }
        if let Some(field) = self.toggle_sort {
            session.toggle_sort(field);
        }
    }
}

/// Books for the session's search, fetched again only after the
/// search or the catalog changes
async fn session_books(
    state: &AppState,
    session: &mut ViewSession,
) -> Result<Arc<Vec<Book>>, ApiError> {
    let revision = state.catalog_revision();
    let query = session.view.active_query().map(str::to_string);
    if let Some(books) = session.cached_books(query.as_deref(), revision) {
        return Ok(books);
    }

    let books = fetch_books(state.source.as_ref(), query.as_deref())
        .await
        .into_result()
        .map_err(|e| (StatusCode::BAD_GATEWAY, e))?;
    let books = Arc::new(books);
    session.store_books(query.as_deref(), revision, Arc::clone(&books));
    Ok(books)
}

/// Compute the session's current page
async fn render(
    state: &AppState,
    session: &mut ViewSession,
) -> Result<(BookView, Vec<String>), ApiError> {
    let books = session_books(state, session).await?;

    let shelves = state.shelves.read().await;
    let view = session.view.compute(&books, &shelves.status());
    Ok((view, available_genres(&books)))
}

/// Show the current view
pub async fn get_view(State(state): State<AppState>) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.view.write().await;
    let (view, genres) = render(&state, &mut session).await?;
    Ok(Json(ViewResponse::new(&session.view, view, genres)))
}

/// Update search, filters or sort
pub async fn update_view(
    State(state): State<AppState>,
    Json(update): Json<ViewUpdate>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.view.write().await;
    update.apply(&mut session.view);

    let (view, genres) = render(&state, &mut session).await?;
    Ok(Json(ViewResponse::new(&session.view, view, genres)))
}

/// Move to another page
pub async fn navigate_view(
    State(state): State<AppState>,
    Json(action): Json<PageAction>,
) -> Result<Json<ViewResponse>, ApiError> {
    let mut session = state.view.write().await;

    // Navigation is bounded by the page count of the current result
    let (current, _) = render(&state, &mut session).await?;
    session.view.navigate(action, current.total_pages);

    let (view, genres) = render(&state, &mut session).await?;
    Ok(Json(ViewResponse::new(&session.view, view, genres)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::create_book;
    use async_trait::async_trait;
    use libris_core::source::SourceResult;
    use libris_core::{BookId, BookSource, MemorySource, MemoryStorage, NewBook, SortDirection};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog that counts list and search calls
    struct CountingSource {
        inner: MemorySource,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl BookSource for CountingSource {
        async fn list_books(&self) -> SourceResult<Vec<Book>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.list_books().await
        }

        async fn search_books(&self, title: &str) -> SourceResult<Vec<Book>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.search_books(title).await
        }

        async fn get_book(&self, id: BookId) -> SourceResult<Book> {
            self.inner.get_book(id).await
        }

        async fn create_book(&self, book: NewBook) -> SourceResult<BookId> {
            self.inner.create_book(book).await
        }

        async fn update_book(&self, id: BookId, book: NewBook) -> SourceResult<()> {
            self.inner.update_book(id, book).await
        }

        async fn delete_book(&self, id: BookId) -> SourceResult<()> {
            self.inner.delete_book(id).await
        }
    }

    #[tokio::test]
    async fn test_view_reuses_fetched_catalog() {
        let source = Arc::new(CountingSource {
            inner: MemorySource::from_books(vec![Book::new(1, "Dune", "Frank Herbert")]),
            fetches: AtomicUsize::new(0),
        });
        let state = AppState::from_parts(source.clone(), Arc::new(MemoryStorage::new()));

        get_view(State(state.clone())).await.unwrap();
        get_view(State(state.clone())).await.unwrap();
        navigate_view(State(state.clone()), Json(PageAction::Next))
            .await
            .unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        // The same snapshot backs every render until something changes
        let first = state.view.read().await.cached_books(None, 0).unwrap();
        get_view(State(state.clone())).await.unwrap();
        let again = state.view.read().await.cached_books(None, 0).unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        // A new search fetches again
        let update: ViewUpdate = serde_json::from_str(r#"{"search": "dune"}"#).unwrap();
        update_view(State(state.clone()), Json(update)).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

        // So does a catalog change
        create_book(State(state.clone()), Json(NewBook::new("Dune Messiah", "Frank Herbert")))
            .await
            .unwrap();
        let Json(view) = get_view(State(state.clone())).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
        assert_eq!(view.total, 2);
    }

    #[test]
    fn test_update_resets_page_on_change() {
        let mut session = LibraryView::new();
        session.navigate(PageAction::Select { page: 3 }, 5);
        assert_eq!(session.page(), 3);

        // Re-sending the current sort is not a change
        ViewUpdate {
            sort: Some(SortSpec::default()),
            ..Default::default()
        }
        .apply(&mut session);
        assert_eq!(session.page(), 3);

        ViewUpdate {
            toggle_sort: Some(SortField::Title),
            ..Default::default()
        }
        .apply(&mut session);
        assert_eq!(session.page(), 1);
        assert_eq!(session.sort().direction, SortDirection::Desc);
    }

    #[test]
    fn test_preset_keeps_genre() {
        let mut session = LibraryView::new();
        ViewUpdate {
            filters: Some(FilterOptions {
                genre: Some("Fantasy".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
        .apply(&mut session);

        let update: ViewUpdate = serde_json::from_str(r#"{"preset": "classic"}"#).unwrap();
        update.apply(&mut session);

        assert_eq!(session.filters().genre.as_deref(), Some("Fantasy"));
        assert_eq!(
            session.filters().publication_year.and_then(|r| r.end),
            Some(1950)
        );
    }

    #[test]
    fn test_update_parses_partial_json() {
        let update: ViewUpdate =
            serde_json::from_str(r#"{"search": "dune", "filters": {"rating": 4.0}}"#).unwrap();
        assert_eq!(update.search.as_deref(), Some("dune"));
        assert_eq!(update.filters.and_then(|f| f.rating), Some(4.0));
        assert!(!update.clear_filters);
    }
}

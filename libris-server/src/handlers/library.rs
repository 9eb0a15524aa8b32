//! Library listing, detail and catalog management handlers

use super::{book_id, source_error, update_shelves, ApiError};
use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use libris_core::view::{available_genres, compute_view_with};
use libris_core::{
    fetch_books, Book, BookId, BookView, FilterOptions, FilterPreset, NewBook, ReadStatus,
    SortDirection, SortField, SortSpec, YearRange, PAGE_SIZE,
};
use serde::{Deserialize, Serialize};

/// Query parameters for listing books
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    /// Title search
    pub search: Option<String>,

    pub genre: Option<String>,

    /// Minimum rating
    pub rating: Option<f64>,

    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
    pub read_status: Option<ReadStatus>,

    /// Quick filter applied over the explicit ones
    pub preset: Option<FilterPreset>,

    pub sort: Option<SortField>,
    pub direction: Option<SortDirection>,

    /// Page number (1-indexed, out of range pages clamp)
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl ListBooksQuery {
    /// Filter options expressed by the query string
    pub fn filters(&self) -> FilterOptions {
        let years = YearRange {
            start: self.year_start,
            end: self.year_end,
        };

        let mut filters = FilterOptions {
            genre: self.genre.clone().filter(|g| !g.is_empty()),
            rating: self.rating,
            publication_year: (!years.is_unbounded()).then_some(years),
            read_status: self.read_status,
        };
        if let Some(preset) = self.preset {
            filters.apply_preset(preset);
        }
        filters
    }

    pub fn sort(&self) -> SortSpec {
        SortSpec::new(
            self.sort.unwrap_or_default(),
            self.direction.unwrap_or_default(),
        )
    }
}

/// List response with pagination
#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total: usize,
    pub total_pages: u32,
    pub page: u32,
    pub per_page: usize,
    pub page_window: Vec<u32>,

    /// Genres present in the searched list, for the filter controls
    pub genres: Vec<String>,
}

impl ListBooksResponse {
    pub fn new(view: BookView, genres: Vec<String>) -> Self {
        Self {
            page_window: view.page_window(),
            total: view.total_count,
            total_pages: view.total_pages,
            page: view.page,
            per_page: PAGE_SIZE,
            books: view.items,
            genres,
        }
    }
}

/// List one page of the library
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<ListBooksResponse>, ApiError> {
    let books = fetch_books(state.source.as_ref(), query.search.as_deref())
        .await
        .into_result()
        .map_err(|e| (StatusCode::BAD_GATEWAY, e))?;

    let shelves = state.shelves.read().await;
    let view = compute_view_with(
        &books,
        &query.filters(),
        &query.sort(),
        query.page,
        PAGE_SIZE,
        &shelves.status(),
    );

    Ok(Json(ListBooksResponse::new(view, available_genres(&books))))
}

/// Book with the user's list membership
#[derive(Debug, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub to_read: bool,
    pub read: bool,
}

/// Get a single book
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookDetail>, ApiError> {
    let id = book_id(&id)?;
    let book = state.source.get_book(id).await.map_err(source_error)?;

    let shelves = state.shelves.read().await;
    Ok(Json(BookDetail {
        to_read: shelves.to_read.contains(book.id),
        read: shelves.read.is_read(book.id),
        book,
    }))
}

/// Create response
#[derive(Debug, Serialize)]
pub struct CreateBookResponse {
    pub id: BookId,
}

fn validate(book: &NewBook) -> Result<(), ApiError> {
    if book.title.trim().is_empty() || book.author.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Title and author are required".to_string(),
        ));
    }
    Ok(())
}

/// Add a book to the catalog
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> Result<(StatusCode, Json<CreateBookResponse>), ApiError> {
    validate(&book)?;
    let title = book.title.clone();
    let id = state.source.create_book(book).await.map_err(source_error)?;
    state.catalog_changed();

    tracing::info!(id, title = %title, "Book created");
    state.broadcast(ServerEvent::BookCreated { id, title });

    Ok((StatusCode::CREATED, Json(CreateBookResponse { id })))
}

/// Replace a book's fields
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(book): Json<NewBook>,
) -> Result<StatusCode, ApiError> {
    let id = book_id(&id)?;
    validate(&book)?;
    state
        .source
        .update_book(id, book)
        .await
        .map_err(source_error)?;
    state.catalog_changed();

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a book from the catalog
///
/// List entries for the book are kept; the to-read list holds snapshots.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = book_id(&id)?;
    state.source.delete_book(id).await.map_err(source_error)?;
    state.catalog_changed();

    state.broadcast(ServerEvent::BookDeleted { id });
    Ok(StatusCode::NO_CONTENT)
}

/// Read-mark response
#[derive(Debug, Serialize)]
pub struct ReadMarkResponse {
    pub id: BookId,
    pub read: bool,
}

/// Mark a catalog book as read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadMarkResponse>, ApiError> {
    let id = book_id(&id)?;
    // Only books the source knows can be marked
    state.source.get_book(id).await.map_err(source_error)?;

    let changed = update_shelves(&state, "read state", move |shelves| {
        shelves.read.mark_read(id)
    })
    .await?;

    if changed {
        state.broadcast(ServerEvent::ReadStatusChanged { id, read: true });
    }
    Ok(Json(ReadMarkResponse { id, read: true }))
}

/// Clear a read mark
pub async fn mark_unread(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadMarkResponse>, ApiError> {
    let id = book_id(&id)?;

    let changed = update_shelves(&state, "read state", move |shelves| {
        shelves.read.mark_unread(id)
    })
    .await?;

    if changed {
        state.broadcast(ServerEvent::ReadStatusChanged { id, read: false });
    }
    Ok(Json(ReadMarkResponse { id, read: false }))
}

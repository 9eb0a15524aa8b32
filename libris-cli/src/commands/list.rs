//! List and genres commands

use super::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use libris_core::view::{available_genres, compute_view_with};
use libris_core::{
    fetch_books, Book, BookView, FilterOptions, FilterPreset, ReadStatus, ReadingLists,
    SortDirection, SortField, SortSpec, YearRange, PAGE_SIZE,
};
use serde::Serialize;

/// Options for `list`
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Title search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only books in this genre
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Minimum rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Earliest publication year
    #[arg(long)]
    pub from: Option<i32>,

    /// Latest publication year
    #[arg(long)]
    pub to: Option<i32>,

    /// Reading status (all, read, unread, to-read)
    #[arg(long)]
    pub status: Option<ReadStatus>,

    /// Quick filter (highly-rated, recent, classic) merged over the others
    #[arg(long)]
    pub preset: Option<FilterPreset>,

    /// Sort field (title, author, rating, year, pages)
    #[arg(long, default_value = "title")]
    pub sort: SortField,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn filters(&self) -> FilterOptions {
        let years = YearRange {
            start: self.from,
            end: self.to,
        };

        let filters = FilterOptions {
            genre: self.genre.clone(),
            rating: self.min_rating,
            publication_year: (!years.is_unbounded()).then_some(years),
            read_status: self.status,
        };
        match self.preset {
            Some(preset) => filters.with_preset(preset),
            None => filters,
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortSpec::new(self.sort, direction)
    }
}

/// JSON output for `list`
#[derive(Serialize)]
struct ListOutput<'a> {
    books: &'a [Book],
    total: usize,
    page: u32,
    total_pages: u32,
}

/// Print one page of the filtered, sorted catalog
pub async fn list(workspace: &Workspace, args: &ListArgs) -> Result<()> {
    let source = workspace.source().await?;
    let shelves = workspace.shelves()?;

    let books = fetch_books(&source, args.search.as_deref())
        .await
        .into_result()
        .map_err(anyhow::Error::msg)
        .context("Failed to read catalog")?;

    let status = shelves.status();
    let view = compute_view_with(
        &books,
        &args.filters(),
        &args.sort_spec(),
        args.page,
        PAGE_SIZE,
        &status,
    );
    tracing::debug!(
        matched = view.total_count,
        page = view.page,
        "Computed library view"
    );

    if args.json {
        let output = ListOutput {
            books: &view.items,
            total: view.total_count,
            page: view.page,
            total_pages: view.total_pages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_view(&view, &args.sort_spec(), &status);
    Ok(())
}

fn print_view(view: &BookView, sort: &SortSpec, status: &ReadingLists<'_>) {
    if view.items.is_empty() {
        println!("No books found");
        return;
    }

    for book in &view.items {
        let mark = if status.read.is_read(book.id) {
            "R"
        } else if status.to_read.contains(book.id) {
            "T"
        } else {
            " "
        };
        let year = book
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        let rating = book.rating.map(|r| format!("{:.1}", r)).unwrap_or_default();

        println!(
            "{:>5} {} {:<40} {:<24} {:>4} {:>4}",
            book.id, mark, book.title, book.author, year, rating
        );
    }

    let pages: Vec<String> = view
        .page_window()
        .into_iter()
        .map(|p| {
            if p == view.page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    let direction = match sort.direction {
        SortDirection::Asc => "ascending",
        SortDirection::Desc => "descending",
    };
    println!();
    println!("Sorted by {} ({})", sort.field.label(), direction);
    println!(
        "Page {} of {} ({} books)  {}",
        view.page,
        view.total_pages,
        view.total_count,
        pages.join(" ")
    );
}

/// Print the genres present in the catalog
pub async fn genres(workspace: &Workspace) -> Result<()> {
    let source = workspace.source().await?;
    let books = fetch_books(&source, None)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)
        .context("Failed to read catalog")?;

    for genre in available_genres(&books) {
        println!("{}", genre);
    }
    Ok(())
}

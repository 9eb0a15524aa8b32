//! Show command implementation

use super::Workspace;
use anyhow::{Context, Result};
use libris_core::{parse_book_id, Book, BookSource};
use serde::Serialize;

/// Book details output
#[derive(Serialize)]
struct BookDetails {
    #[serde(flatten)]
    book: Book,
    to_read: bool,
    read: bool,
}

/// Display details for one book
pub async fn show(workspace: &Workspace, id: &str, json: bool) -> Result<()> {
    let id = parse_book_id(id)?;
    let source = workspace.source().await?;
    let shelves = workspace.shelves()?;

    let book = source
        .get_book(id)
        .await
        .with_context(|| format!("No book with id {}", id))?;

    let details = BookDetails {
        to_read: shelves.to_read.contains(id),
        read: shelves.read.is_read(id),
        book,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let book = &details.book;
    println!("Title:       {}", book.title);
    println!("Author:      {}", book.author);
    if let Some(genre) = &book.genre {
        println!("Genre:       {}", genre);
    }
    if let Some(year) = book.publication_year {
        println!("Published:   {}", year);
    }
    if let Some(publisher) = &book.publisher {
        println!("Publisher:   {}", publisher);
    }
    if let Some(isbn) = &book.isbn {
        println!("ISBN:        {}", isbn);
    }
    if let Some(pages) = book.pages {
        println!("Pages:       {}", pages);
    }
    if let Some(rating) = book.rating {
        println!("Rating:      {:.1}", rating);
    }
    if let Some(desc) = &book.description {
        println!("Description: {}", desc);
    }
    println!("To read:     {}", if details.to_read { "yes" } else { "no" });
    println!("Read:        {}", if details.read { "yes" } else { "no" });

    Ok(())
}

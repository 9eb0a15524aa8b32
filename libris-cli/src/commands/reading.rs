//! To-read list and read mark commands

use super::Workspace;
use anyhow::{Context, Result};
use libris_core::{parse_book_id, BookSource};

/// Print the to-read list in insertion order
pub fn to_read_list(workspace: &Workspace, json: bool) -> Result<()> {
    let shelves = workspace.shelves()?;
    let books = shelves.to_read.books();

    if json {
        println!("{}", serde_json::to_string_pretty(books)?);
    } else if books.is_empty() {
        println!("To-read list is empty");
    } else {
        for book in books {
            println!("{:>5}  {} by {}", book.id, book.title, book.author);
        }
    }
    Ok(())
}

pub async fn to_read_add(workspace: &Workspace, id: &str) -> Result<()> {
    let id = parse_book_id(id)?;
    let source = workspace.source().await?;
    let mut shelves = workspace.shelves()?;

    let book = source
        .get_book(id)
        .await
        .with_context(|| format!("No book with id {}", id))?;
    let title = book.title.clone();

    if shelves
        .to_read
        .add(book)
        .context("Failed to save to-read list")?
    {
        tracing::info!("Added {} to the to-read list", title);
        println!("Added \"{}\" to the to-read list", title);
    } else {
        println!("\"{}\" is already on the to-read list", title);
    }
    Ok(())
}

/// Remove a book; works for books no longer in the catalog
pub fn to_read_remove(workspace: &Workspace, id: &str) -> Result<()> {
    let id = parse_book_id(id)?;
    let mut shelves = workspace.shelves()?;

    if shelves
        .to_read
        .remove(id)
        .context("Failed to save to-read list")?
    {
        println!("Removed book {} from the to-read list", id);
    } else {
        println!("Book {} is not on the to-read list", id);
    }
    Ok(())
}

pub async fn mark_read(workspace: &Workspace, id: &str) -> Result<()> {
    let id = parse_book_id(id)?;
    let source = workspace.source().await?;
    let mut shelves = workspace.shelves()?;

    let book = source
        .get_book(id)
        .await
        .with_context(|| format!("No book with id {}", id))?;

    shelves
        .read
        .mark_read(id)
        .context("Failed to save read state")?;
    println!("Marked \"{}\" as read", book.title);
    Ok(())
}

pub fn mark_unread(workspace: &Workspace, id: &str) -> Result<()> {
    let id = parse_book_id(id)?;
    let mut shelves = workspace.shelves()?;

    shelves
        .read
        .mark_unread(id)
        .context("Failed to save read state")?;
    println!("Marked book {} as unread", id);
    Ok(())
}

//! Theme and stats commands

use super::Workspace;
use anyhow::{Context, Result};
use libris_core::{BookSource, LibraryStats, Theme};

/// Show the current theme, or set a new one
pub fn theme(workspace: &Workspace, theme: Option<Theme>) -> Result<()> {
    let mut shelves = workspace.shelves()?;

    match theme {
        Some(theme) => {
            shelves
                .preferences
                .set_theme(theme)
                .context("Failed to save theme")?;
            println!("Theme set to {}", theme);
        }
        None => println!("{}", shelves.preferences.theme()),
    }
    Ok(())
}

/// Print library statistics
pub async fn stats(workspace: &Workspace, json: bool) -> Result<()> {
    let source = workspace.source().await?;
    let shelves = workspace.shelves()?;

    let books = source.list_books().await.context("Failed to read catalog")?;
    let stats = LibraryStats::collect(&books, &shelves.status());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Books:    {}", stats.total_books);
        println!("Read:     {}", stats.books_read);
        println!("To read:  {}", stats.to_read);
        println!("Genres:   {}", stats.genres);
    }
    Ok(())
}

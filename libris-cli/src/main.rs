//! Libris CLI - Command-line interface for browsing a book catalog

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ListArgs, Workspace};
use libris_core::Theme;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "libris")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON catalog file
    #[arg(long, global = true, env = "LIBRIS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory holding the reading lists and settings
    #[arg(
        long,
        global = true,
        env = "LIBRIS_DATA_PATH",
        default_value = "./libris_data"
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List books with search, filters, sorting and paging
    List(ListArgs),

    /// Show details for one book
    Show {
        /// Book id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the genres present in the catalog
    Genres,

    /// Manage the to-read list
    #[command(subcommand)]
    ToRead(ToReadCommand),

    /// Mark a book as read
    Read {
        /// Book id
        id: String,
    },

    /// Clear a book's read mark
    Unread {
        /// Book id
        id: String,
    },

    /// Show or set the color theme
    Theme {
        /// New theme (light, dark)
        theme: Option<Theme>,
    },

    /// Show library statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ToReadCommand {
    /// Show the to-read list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a catalog book to the list
    Add {
        /// Book id
        id: String,
    },

    /// Remove a book from the list
    Remove {
        /// Book id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "libris_cli=debug,libris_core=debug"
    } else {
        "libris_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let workspace = Workspace::new(cli.catalog, cli.data_dir);

    match cli.command {
        Commands::List(args) => commands::list(&workspace, &args).await,

        Commands::Show { id, json } => commands::show(&workspace, &id, json).await,

        Commands::Genres => commands::genres(&workspace).await,

        Commands::ToRead(ToReadCommand::List { json }) => commands::to_read_list(&workspace, json),
        Commands::ToRead(ToReadCommand::Add { id }) => commands::to_read_add(&workspace, &id).await,
        Commands::ToRead(ToReadCommand::Remove { id }) => commands::to_read_remove(&workspace, &id),

        Commands::Read { id } => commands::mark_read(&workspace, &id).await,
        Commands::Unread { id } => commands::mark_unread(&workspace, &id),

        Commands::Theme { theme } => commands::theme(&workspace, theme),

        Commands::Stats { json } => commands::stats(&workspace, json).await,
    }
}

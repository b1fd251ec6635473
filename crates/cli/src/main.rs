//! Shopfeed CLI - sf command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod sample;
mod system_config;
mod util;

/// Shopfeed - Incremental product search in your terminal
#[derive(Parser)]
#[command(name = "sf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and page through all results
    Search {
        /// Free-text query (empty matches everything)
        #[arg(default_value = "")]
        query: String,

        /// Color filters (repeatable, e.g. --color blue --color red)
        #[arg(long = "color")]
        colors: Vec<String>,

        /// Minimum price in cents
        #[arg(long)]
        min: Option<u64>,

        /// Maximum price in cents
        #[arg(long)]
        max: Option<u64>,

        /// Preset price range (1-5, see `sf config --list`)
        #[arg(long, conflicts_with_all = ["min", "max"])]
        preset: Option<usize>,

        /// Catalog JSON file (default: built-in sample catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Maximum number of pages to fetch (default: all)
        #[arg(long)]
        pages: Option<usize>,
    },
    /// Run a scripted browsing session (typing, debounce, infinite scroll)
    Demo {
        /// Catalog JSON file (default: built-in sample catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show configuration
    Config {
        /// List all configuration values
        #[arg(long)]
        list: bool,

        /// Show the config file path
        #[arg(long)]
        path: bool,

        /// Print an example config file
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            colors,
            min,
            max,
            preset,
            catalog,
            pages,
        } => cmd::search::run(&query, &colors, min, max, preset, catalog, pages).await,
        Commands::Demo { catalog } => cmd::demo::run(catalog).await,
        Commands::Config {
            list,
            path,
            example,
        } => cmd::config::run(list, path, example).await,
    }
}

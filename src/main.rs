//! # Site Search CLI (`sitesearch`)
//!
//! ## Usage
//!
//! ```bash
//! sitesearch --config ./config/sitesearch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sitesearch search "<query>"` | Rank catalog pages against a query |
//! | `sitesearch related <url>` | Suggest pages related to a page |
//! | `sitesearch pages` | List the catalog |
//! | `sitesearch categories` | List categories with page counts |
//! | `sitesearch serve` | Start the JSON HTTP API |
//! | `sitesearch completions <shell>` | Print shell completions |

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use site_search::{config, pages, related, search, server};

/// Site Search CLI — keyword search over a static site's page catalog.
///
/// A missing config file is not an error: built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "sitesearch",
    about = "Keyword search and related-content suggestions for a static site",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/sitesearch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the catalog.
    ///
    /// Queries shorter than two characters (after trimming) return nothing.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results (capped at `[search].max_results`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest pages related to the page at URL.
    Related {
        /// Relative page URL, e.g. `conditions/lupus.html`.
        url: String,

        /// Maximum number of suggestions (capped at `[related].max_results`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List catalog pages.
    Pages {
        /// Only list pages in this category (case-insensitive).
        #[arg(long)]
        category: Option<String>,
    },

    /// List categories and how many pages each holds.
    Categories,

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,

    /// Print a shell completion script to stdout.
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "sitesearch",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Commands::Pages { category } => {
            pages::list_pages(category.as_deref())?;
            return Ok(());
        }
        Commands::Categories => {
            pages::list_categories()?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Search { query, limit, json } => {
            search::run_search(&cfg, &query, limit, json)?;
        }
        Commands::Related { url, limit, json } => {
            related::run_related(&cfg, &url, limit, json)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Pages { .. } | Commands::Categories | Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}

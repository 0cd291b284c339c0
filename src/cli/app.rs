use super::commands::search::SearchArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hero-query")]
#[command(about = "Browse, edit and search heroes through the heroes web API")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the heroes API (overrides config and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all heroes
    List,
    /// Show a single hero
    Get {
        /// Hero id
        id: i64,
    },
    /// Create a hero; the server assigns its id
    Create {
        /// Hero name
        name: String,
    },
    /// Rename an existing hero
    Update {
        /// Hero id
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a hero
    Delete {
        /// Hero id
        id: i64,
    },
    /// Search as you type: every stdin line is the current search box contents
    Search(SearchArgs),
}

use super::app_config::{API_KEY_ENV, LogLevel};
use crate::domain::entities::SortOption;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "event-catalog",
    version,
    about = "Browse the public event catalog from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Catalog API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Catalog host.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Country code filter.
    #[arg(long)]
    pub country_code: Option<String>,

    /// Results per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List upcoming events.
    List {
        /// Sort order.
        #[arg(long, value_enum)]
        sort: Option<SortOption>,

        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Download the chosen image of every listing.
        #[arg(long)]
        images: bool,
    },
    /// Show one event in full.
    Detail {
        /// Event identifier.
        id: String,
    },
}

//! Command-line front end for the `pagesplit` binary.

pub mod extract_cmd;
pub mod history_cmd;
pub mod output;
pub mod serve;

use crate::config::AppConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use extract_cmd::Artifact;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pagesplit",
    version,
    about = "Split a web page into clean HTML, collected CSS and collected JavaScript"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress human-readable output.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve POST /api/scrape over HTTP.
    Serve,
    /// Split one page.
    Extract(ExtractArgs),
    /// Browse or prune the recent-URL history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExtractArgs {
    /// Page to fetch.
    #[arg(required_unless_present = "file")]
    pub url: Option<String>,

    /// Split a local HTML file instead of fetching a URL.
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Write page.html, styles.css and scripts.js into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Do not record the result in history.
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List saved URLs, most recent first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print a saved artifact.
    Show {
        url: String,
        #[arg(long, value_enum, default_value = "html")]
        artifact: Artifact,
    },
    /// Remove one URL.
    Remove { url: String },
    /// Remove every entry.
    Clear,
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve => serve::run(&cli.config).await,
        Command::Extract(args) => extract_cmd::run(&cli.config, &args).await,
        Command::History { action } => match action {
            HistoryAction::List { json } => history_cmd::run_list(&cli.config, json),
            HistoryAction::Show { url, artifact } => {
                history_cmd::run_show(&cli.config, &url, artifact)
            }
            HistoryAction::Remove { url } => history_cmd::run_remove(&cli.config, &url),
            HistoryAction::Clear => history_cmd::run_clear(&cli.config),
        },
    }
}

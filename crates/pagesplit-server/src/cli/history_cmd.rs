//! `pagesplit history`: browse and prune the recent-URL history.

use crate::cli::extract_cmd::Artifact;
use crate::cli::output::{self, Styled};
use crate::config::AppConfig;
use crate::history::History;
use anyhow::{bail, Result};

pub fn run_list(config: &AppConfig, json: bool) -> Result<()> {
    let history = History::load(config.history_path())?;

    if json {
        let entries: Vec<_> = history
            .entries()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "url": e.url,
                    "timestamp": e.timestamp.to_rfc3339(),
                    "stats": e.content.stats,
                })
            })
            .collect();
        output::print_json(&serde_json::Value::Array(entries));
        return Ok(());
    }

    if history.is_empty() {
        eprintln!("  No history yet.");
        return Ok(());
    }

    let s = Styled::new();
    for (i, entry) in history.entries().iter().enumerate() {
        eprintln!(
            "  {:>2}. {} {}",
            i + 1,
            s.bold(&entry.url),
            s.dim(&entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        );
    }
    Ok(())
}

/// Print one saved artifact to stdout.
pub fn run_show(config: &AppConfig, url: &str, artifact: Artifact) -> Result<()> {
    let history = History::load(config.history_path())?;
    let Some(entry) = history.get(url) else {
        bail!("no history entry for '{url}'");
    };
    let content = &entry.content;
    println!("{}", artifact.select(&content.html, &content.css, &content.js));
    Ok(())
}

pub fn run_remove(config: &AppConfig, url: &str) -> Result<()> {
    let s = Styled::new();
    let mut history = History::load(config.history_path())?;
    if history.remove(url) {
        history.save()?;
        if !output::is_quiet() {
            eprintln!("  {} Removed '{url}' from history.", s.ok_sym());
        }
    } else if !output::is_quiet() {
        eprintln!("  No history entry for '{url}'.");
    }
    Ok(())
}

pub fn run_clear(config: &AppConfig) -> Result<()> {
    let s = Styled::new();
    let mut history = History::load(config.history_path())?;
    let count = history.len();
    history.clear();
    history.save()?;
    if !output::is_quiet() {
        eprintln!("  {} Cleared {count} history entr{}.", s.ok_sym(), if count == 1 { "y" } else { "ies" });
    }
    Ok(())
}

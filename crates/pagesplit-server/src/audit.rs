//! JSONL audit log: one line per extraction attempt, success or failure.

use anyhow::{Context, Result};
use chrono::Utc;
use pagesplit::ExtractionStats;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// A single audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: String,
    /// Entry point: `scrape` (HTTP) or `extract` (CLI).
    pub method: String,
    pub url: String,
    pub domain: Option<String>,
    pub duration_ms: u64,
    /// `ok`, `input_error` or `fetch_error`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ExtractionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    pub fn new(method: &str, url: &str, duration_ms: u64, status: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            method: method.to_string(),
            url: url.to_string(),
            domain: url::Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(String::from)),
            duration_ms,
            status: status.to_string(),
            stats: None,
            error: None,
        }
    }

    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Append-only JSONL audit logger.
#[derive(Debug)]
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create the audit log file.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open audit log: {}", path.display()))?;

        Ok(Self { file })
    }

    pub fn log(&mut self, event: &AuditEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }
}

//! Recent-URL history: at most [`HISTORY_LIMIT`] successful extractions,
//! most recent first, one entry per URL, persisted as a JSON array.

use chrono::{DateTime, Utc};
use pagesplit::{ExtractionResult, ExtractionStats};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to access history file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("history file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The saved artifacts of one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryContent {
    pub html: String,
    pub css: String,
    pub js: String,
    #[serde(default)]
    pub stats: ExtractionStats,
}

impl From<&ExtractionResult> for HistoryContent {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            html: result.html.clone(),
            css: result.css.clone(),
            js: result.js.clone(),
            stats: result.stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub content: HistoryContent,
}

/// History backed by a JSON file.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Load history from `path`. A missing file is an empty history.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| HistoryError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        let mut history = Self { path, entries };
        history.entries.truncate(HISTORY_LIMIT);
        Ok(history)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.url == url)
    }

    /// Put `url` at the front, dropping any older entry for the same URL and
    /// anything beyond the limit.
    pub fn record(&mut self, url: &str, result: &ExtractionResult) {
        self.record_at(url, result, Utc::now());
    }

    fn record_at(&mut self, url: &str, result: &ExtractionResult, timestamp: DateTime<Utc>) {
        self.entries.retain(|e| e.url != url);
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                timestamp,
                content: HistoryContent::from(result),
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Remove the entry for `url`. Returns whether one existed.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.url != url);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the history back to its file, creating the directory if needed.
    pub fn save(&self) -> Result<(), HistoryError> {
        let io_err = |source| HistoryError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            HistoryError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn result(marker: &str) -> ExtractionResult {
        pagesplit::split_markup(&format!("<p>{marker}</p>"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::load(dir.path().join("history.json")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_record_dedupes_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::load(dir.path().join("history.json")).unwrap();
        let t0 = Utc::now();

        history.record_at("https://a.example", &result("a1"), t0);
        history.record_at("https://b.example", &result("b"), t0 + Duration::seconds(1));
        history.record_at("https://a.example", &result("a2"), t0 + Duration::seconds(2));

        let urls: Vec<_> = history.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
        assert!(history.entries()[0].content.html.contains("a2"));
    }

    #[test]
    fn test_capped_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::load(dir.path().join("history.json")).unwrap();
        for i in 0..15 {
            history.record(&format!("https://site{i}.example"), &result("x"));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.entries()[0].url, "https://site14.example");
        assert!(history.get("https://site4.example").is_none());
        assert!(history.get("https://site5.example").is_some());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut history = History::load(&path).unwrap();
        history.record("https://a.example", &result("a"));
        history.record("https://b.example", &result("b"));
        history.save().unwrap();

        let reloaded = History::load(&path).unwrap();
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::load(dir.path().join("history.json")).unwrap();
        history.record("https://a.example", &result("a"));
        history.record("https://b.example", &result("b"));

        assert!(history.remove("https://a.example"));
        assert!(!history.remove("https://a.example"));
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            History::load(&path),
            Err(HistoryError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_reads_entries_without_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[{"url":"https://a.example","timestamp":"2026-01-15T12:00:00Z",
                "content":{"html":"<p></p>","css":"","js":""}}]"#,
        )
        .unwrap();
        let history = History::load(&path).unwrap();
        assert_eq!(history.entries()[0].content.stats, ExtractionStats::default());
    }
}

//! `pagesplit extract`: split one page and report, save or print it.

use crate::audit::{AuditEvent, AuditLogger};
use crate::cli::output::{self, Styled};
use crate::cli::ExtractArgs;
use crate::config::AppConfig;
use crate::history::History;
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use pagesplit::{split_markup, ExtractionRequest, ExtractionResult, Splitter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

/// One of the three artifacts of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    Html,
    Css,
    Js,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Html, Artifact::Css, Artifact::Js];

    /// File name used when the artifact is written to disk.
    pub fn filename(self) -> &'static str {
        match self {
            Artifact::Html => "page.html",
            Artifact::Css => "styles.css",
            Artifact::Js => "scripts.js",
        }
    }

    pub fn select<'a>(self, html: &'a str, css: &'a str, js: &'a str) -> &'a str {
        match self {
            Artifact::Html => html,
            Artifact::Css => css,
            Artifact::Js => js,
        }
    }
}

/// Write `page.html`, `styles.css` and `scripts.js` into `dir`.
pub fn write_artifacts(dir: &Path, result: &ExtractionResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let path = dir.join(artifact.filename());
        let body = artifact.select(&result.html, &result.css, &result.js);
        std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub async fn run(config: &AppConfig, args: &ExtractArgs) -> Result<()> {
    let started = Instant::now();

    let (source, outcome) = match &args.file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            (path.display().to_string(), Ok(split_markup(&raw)))
        }
        None => {
            // history and audit key on the URL that is actually fetched
            let url = args.url.as_deref().unwrap_or_default().trim().to_string();
            let splitter = Splitter::new(config.fetch_config())?;
            let outcome = splitter.split(&ExtractionRequest::new(url.clone())).await;
            (url, outcome)
        }
    };
    let elapsed = started.elapsed().as_millis() as u64;

    let event = match &outcome {
        Ok(result) => AuditEvent::new("extract", &source, elapsed, "ok").with_stats(result.stats),
        Err(e) if e.is_input() => {
            AuditEvent::new("extract", &source, elapsed, "input_error").with_error(e.details())
        }
        Err(e) => AuditEvent::new("extract", &source, elapsed, "fetch_error").with_error(e.details()),
    };
    audit(config, &event);

    let result = outcome.map_err(|e| anyhow!("{}: {}", e.category(), e.details()))?;

    let written = match &args.out {
        Some(dir) => write_artifacts(dir, &result)?,
        None => Vec::new(),
    };

    if args.file.is_none() && !args.no_history {
        let mut history = History::load(config.history_path())?;
        history.record(&source, &result);
        history.save()?;
    }

    if args.json {
        output::print_json(&serde_json::to_value(&result)?);
    } else if !output::is_quiet() {
        print_summary(&source, &result, &written, elapsed);
    }
    Ok(())
}

fn audit(config: &AppConfig, event: &AuditEvent) {
    if config.no_audit {
        return;
    }
    let logged = AuditLogger::open(&config.audit_path()).and_then(|mut l| l.log(event));
    if let Err(e) = logged {
        warn!("failed to write audit event: {e:#}");
    }
}

fn print_summary(source: &str, result: &ExtractionResult, written: &[PathBuf], elapsed_ms: u64) {
    let s = Styled::new();
    eprintln!(
        "  {} {} {}",
        s.ok_sym(),
        s.bold(source),
        s.dim(&format!("({elapsed_ms} ms)"))
    );
    output::print_check(
        &s.green("html"),
        "clean markup",
        &output::format_size(result.html.len() as u64),
    );
    output::print_check(
        &s.green("css"),
        "inline styles",
        &format!(
            "{} ({})",
            result.stats.css_inline,
            output::format_size(result.css.len() as u64)
        ),
    );
    output::print_check(
        &s.green("js"),
        "scripts",
        &format!(
            "{} inline, {} external ({})",
            result.stats.js_inline,
            result.stats.js_external,
            output::format_size(result.js.len() as u64)
        ),
    );
    for path in written {
        eprintln!("    {} {}", s.dim("wrote"), path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let result = split_markup("<style>p{}</style><p>hi</p><script>go()</script>");

        let written = write_artifacts(&out, &result).unwrap();
        assert_eq!(written.len(), 3);

        let html = std::fs::read_to_string(out.join("page.html")).unwrap();
        let css = std::fs::read_to_string(out.join("styles.css")).unwrap();
        let js = std::fs::read_to_string(out.join("scripts.js")).unwrap();
        assert!(html.contains("<p>hi</p>"));
        assert!(css.contains("p{}"));
        assert!(js.contains("go()"));
    }

    #[tokio::test]
    async fn test_extract_from_file_skips_history() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        std::fs::write(&page, "<script src=\"x.js\"></script><p>local</p>").unwrap();

        let config = AppConfig {
            home: Some(dir.path().join("home")),
            no_audit: true,
            ..AppConfig::default()
        };
        let args = ExtractArgs {
            url: None,
            file: Some(page),
            out: Some(dir.path().join("out")),
            json: true,
            no_history: false,
        };

        run(&config, &args).await.unwrap();
        assert!(dir.path().join("out").join("scripts.js").exists());
        assert!(!config.history_path().exists());
    }
}

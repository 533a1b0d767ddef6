//! Fetch → parse → extract → assemble, one document per call.

use crate::acquisition::{FetchConfig, Fetcher};
use crate::assembly::{assemble, ExtractionResult};
use crate::error::{SplitError, SplitResult};
use crate::extraction::extract;
use crate::parsing::ParsedTree;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Incoming request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// The URL to fetch. Absent, empty and whitespace-only URLs are input errors.
    pub fn validated_url(&self) -> SplitResult<&str> {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(SplitError::Input("url is missing or empty".to_string())),
        }
    }
}

/// Parse, extract and assemble markup that is already in hand.
pub fn split_markup(raw: &str) -> ExtractionResult {
    let mut tree = ParsedTree::parse(raw);
    let extraction = extract(&mut tree);
    assemble(&tree, &extraction.styles, &extraction.scripts)
}

/// Runs the whole pipeline. Holds no per-request state, so one splitter can
/// serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Splitter {
    fetcher: Fetcher,
}

impl Splitter {
    pub fn new(config: FetchConfig) -> SplitResult<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Split the page named by `request`. Input errors are raised before any
    /// network traffic; every failure is terminal.
    #[instrument(skip_all, fields(url = ?request.url))]
    pub async fn split(&self, request: &ExtractionRequest) -> SplitResult<ExtractionResult> {
        let url = request.validated_url()?;
        let started = Instant::now();

        let document = self.fetcher.fetch(url).await?;
        if !document.is_html() {
            warn!(
                content_type = document.content_type.as_deref().unwrap_or_default(),
                "non-HTML response, parsing best-effort"
            );
        }
        debug!(
            final_url = %document.final_url,
            status = document.status,
            "parsing fetched page"
        );

        // The parsed tree is not Send; keep it on a blocking thread.
        let body = document.body;
        let result = tokio::task::spawn_blocking(move || split_markup(&body))
            .await
            .map_err(|e| SplitError::Task(e.to_string()))?;

        info!(
            css_inline = result.stats.css_inline,
            js_inline = result.stats.js_inline,
            js_external = result.stats.js_external,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "page split"
        );
        Ok(result)
    }
}

//! Error taxonomy for one extraction run.
//!
//! Every error is terminal for the invocation: a caller either gets a full
//! [`ExtractionResult`](crate::assembly::ExtractionResult) or one of these.
//! Parsing has no error variant because the parser recovers from any input.

use std::time::Duration;
use thiserror::Error;

/// Category reported for requests that arrive without a usable URL.
pub const INPUT_CATEGORY: &str = "URL is required";

/// Category reported for every server-side failure (fetch or internal).
pub const FETCH_CATEGORY: &str = "Erreur lors de la récupération du contenu";

/// Failure while acquiring the remote document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status code {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Any failure of the fetch-and-extract pipeline.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Missing or malformed request payload. Raised before any fetch.
    #[error("invalid request: {0}")]
    Input(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The blocking parse/extract task did not complete.
    #[error("extraction task failed: {0}")]
    Task(String),
}

impl SplitError {
    /// Human-readable category for the `error` field of failure responses.
    pub fn category(&self) -> &'static str {
        match self {
            SplitError::Input(_) => INPUT_CATEGORY,
            SplitError::Fetch(_) | SplitError::Task(_) => FETCH_CATEGORY,
        }
    }

    /// Whether the caller is at fault (bad request) rather than the server.
    pub fn is_input(&self) -> bool {
        matches!(self, SplitError::Input(_))
    }

    /// The upstream message, without the category prefix.
    pub fn details(&self) -> String {
        match self {
            SplitError::Input(msg) | SplitError::Task(msg) => msg.clone(),
            SplitError::Fetch(err) => err.to_string(),
        }
    }
}

pub type SplitResult<T> = Result<T, SplitError>;

//! Remote document acquisition.
//!
//! One bounded-time GET per extraction, with a browser User-Agent so the
//! page is served the way a visitor would see it.

pub mod fetcher;

pub use fetcher::{FetchConfig, Fetcher, RawDocument, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

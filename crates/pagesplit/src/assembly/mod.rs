//! Packaging of the three artifacts and their counts.

pub mod response;

pub use response::{assemble, ExtractionResult, ExtractionStats, EMPTY_HTML_FALLBACK};

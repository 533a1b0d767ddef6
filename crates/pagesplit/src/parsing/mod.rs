//! Lenient HTML parsing into a mutable tree.

pub mod document;

pub use document::{NodeView, ParsedTree};

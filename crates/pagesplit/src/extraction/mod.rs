//! Style and script extraction.
//!
//! Walks a [`ParsedTree`](crate::parsing::ParsedTree) once per node kind,
//! classifies every `style`, stylesheet `link` and `script` element, numbers
//! the resulting fragments, and strips `style`/`script` elements from the
//! tree. [`render`] turns the fragment lists into the two text artifacts.

pub mod classify;
pub mod render;

pub use classify::{extract, Extraction, ScriptFragment, ScriptNode, StyleFragment, StyleNode};
pub use render::{render_css, render_js, NO_CSS_PLACEHOLDER, NO_JS_PLACEHOLDER};

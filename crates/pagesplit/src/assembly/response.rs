//! The [`ExtractionResult`] returned to callers.

use crate::extraction::{render_css, render_js, ScriptFragment, StyleFragment};
use crate::parsing::ParsedTree;
use serde::{Deserialize, Serialize};

/// Markup returned when the cleaned tree serializes to nothing.
pub const EMPTY_HTML_FALLBACK: &str =
    "<!DOCTYPE html><html><body><!-- Aucun contenu HTML --></body></html>";

/// Fragment counts. External stylesheets are annotated in `css` only and
/// have no counter here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub css_inline: usize,
    pub js_inline: usize,
    pub js_external: usize,
}

/// Clean markup plus collected CSS and JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Page markup with every `style` and `script` element removed.
    pub html: String,
    pub css: String,
    pub js: String,
    pub stats: ExtractionStats,
}

/// Build the result from an already-stripped tree and its fragments.
pub fn assemble(
    tree: &ParsedTree,
    styles: &[StyleFragment],
    scripts: &[ScriptFragment],
) -> ExtractionResult {
    let serialized = tree.serialize();
    let html = if serialized.trim().is_empty() {
        EMPTY_HTML_FALLBACK.to_string()
    } else {
        serialized
    };

    let stats = ExtractionStats {
        css_inline: styles
            .iter()
            .filter(|f| matches!(f, StyleFragment::Inline { .. }))
            .count(),
        js_inline: scripts
            .iter()
            .filter(|f| matches!(f, ScriptFragment::Inline { .. }))
            .count(),
        js_external: scripts
            .iter()
            .filter(|f| matches!(f, ScriptFragment::External { .. }))
            .count(),
    };

    ExtractionResult {
        html,
        css: render_css(styles),
        js: render_js(scripts),
        stats,
    }
}

//! Node classification and fragment numbering.

use crate::parsing::{NodeView, ParsedTree};
use serde::Serialize;
use tracing::debug;

/// What a `style` element contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    /// Non-whitespace body, already trimmed.
    Inline(String),
    /// Nothing to report; the element is still removed.
    Empty,
}

/// What a `script` element contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptNode {
    /// Non-empty `src`. Any inline body is ignored.
    External(String),
    /// Non-whitespace body, already trimmed.
    Inline(String),
    /// Neither; the element is still removed.
    Empty,
}

/// One entry of the CSS artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StyleFragment {
    Inline { index: usize, text: String },
    External { href: String },
}

/// One entry of the JavaScript artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScriptFragment {
    Inline { index: usize, text: String },
    External { index: usize, src: String },
}

/// Ordered fragments found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Inline styles in document order, then stylesheet links in document order.
    pub styles: Vec<StyleFragment>,
    /// Scripts in document order.
    pub scripts: Vec<ScriptFragment>,
}

impl Extraction {
    pub fn inline_styles(&self) -> usize {
        self.styles
            .iter()
            .filter(|f| matches!(f, StyleFragment::Inline { .. }))
            .count()
    }

    pub fn external_styles(&self) -> usize {
        self.styles.len() - self.inline_styles()
    }

    pub fn inline_scripts(&self) -> usize {
        self.scripts
            .iter()
            .filter(|f| matches!(f, ScriptFragment::Inline { .. }))
            .count()
    }

    pub fn external_scripts(&self) -> usize {
        self.scripts.len() - self.inline_scripts()
    }
}

/// Classify a `style` element.
pub fn classify_style(node: &NodeView<'_>) -> StyleNode {
    let content = node.inner_content();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        StyleNode::Empty
    } else {
        StyleNode::Inline(trimmed.to_string())
    }
}

/// Classify a `script` element. A non-empty `src` wins over any body.
pub fn classify_script(node: &NodeView<'_>) -> ScriptNode {
    if let Some(src) = node.attr("src").filter(|s| !s.is_empty()) {
        return ScriptNode::External(src.to_string());
    }
    let content = node.inner_content();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        ScriptNode::Empty
    } else {
        ScriptNode::Inline(trimmed.to_string())
    }
}

/// `href` of a `link` element that references a stylesheet, if any.
pub fn stylesheet_href<'a>(node: &NodeView<'a>) -> Option<&'a str> {
    let is_stylesheet = node
        .attr("rel")
        .is_some_and(|rel| rel.trim().eq_ignore_ascii_case("stylesheet"));
    if !is_stylesheet {
        return None;
    }
    node.attr("href").filter(|href| !href.is_empty())
}

/// Classify and number every style and script node, then remove all
/// `style` and `script` elements from `tree`.
///
/// Stylesheet `link` elements are annotated but stay in the tree.
pub fn extract(tree: &mut ParsedTree) -> Extraction {
    let mut extraction = Extraction::default();

    let mut inline_style = 0;
    for node in tree.query_all("style") {
        if let StyleNode::Inline(text) = classify_style(&node) {
            inline_style += 1;
            extraction.styles.push(StyleFragment::Inline {
                index: inline_style,
                text,
            });
        }
    }

    for node in tree.query_all("link") {
        if let Some(href) = stylesheet_href(&node) {
            extraction.styles.push(StyleFragment::External {
                href: href.to_string(),
            });
        }
    }

    let (mut inline_script, mut external_script) = (0, 0);
    for node in tree.query_all("script") {
        match classify_script(&node) {
            ScriptNode::External(src) => {
                external_script += 1;
                extraction.scripts.push(ScriptFragment::External {
                    index: external_script,
                    src,
                });
            }
            ScriptNode::Inline(text) => {
                inline_script += 1;
                extraction.scripts.push(ScriptFragment::Inline {
                    index: inline_script,
                    text,
                });
            }
            ScriptNode::Empty => {}
        }
    }

    let styles_removed = tree.remove_all("style");
    let scripts_removed = tree.remove_all("script");
    debug!(
        inline_styles = extraction.inline_styles(),
        external_styles = extraction.external_styles(),
        inline_scripts = extraction.inline_scripts(),
        external_scripts = extraction.external_scripts(),
        parse_errors = tree.parse_errors(),
        styles_removed,
        scripts_removed,
        "extracted fragments"
    );

    extraction
}

//! Owned, mutable document tree backed by `scraper` (html5ever).
//!
//! Parsing never fails: html5ever applies the browser recovery rules to
//! unclosed tags, stray end tags and missing doctypes, and records what it
//! had to repair in [`ParsedTree::parse_errors`].
//!
//! The tree is built with scripting disabled, the way a static HTML tool sees
//! a page: `noscript` children are real elements, so their `style`/`script`
//! nodes can be extracted and the rest serializes as markup, not as text.

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink, Selector};
use tracing::debug;

/// A parsed page, exclusively owned by one extraction run.
pub struct ParsedTree {
    document: Html,
}

/// Read-only view of one element, in document order.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    element: ElementRef<'a>,
}

impl<'a> NodeView<'a> {
    /// Lower-case local name of the element.
    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Raw character content of the element's subtree. For `style` and
    /// `script` this is the untouched source text.
    pub fn inner_content(&self) -> String {
        self.element.text().collect()
    }
}

impl ParsedTree {
    /// Parse a full document with browser-style error recovery.
    pub fn parse(raw: &str) -> Self {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..TreeBuilderOpts::default()
            },
            ..ParseOpts::default()
        };
        let document =
            html5ever::driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts)
                .one(raw);
        if !document.errors.is_empty() {
            debug!(
                errors = document.errors.len(),
                "recovered from malformed markup"
            );
        }
        Self { document }
    }

    /// Number of syntax problems the parser repaired.
    pub fn parse_errors(&self) -> usize {
        self.document.errors.len()
    }

    /// All elements with the given tag name, in document order.
    ///
    /// A tag name that is not a valid type selector matches nothing.
    pub fn query_all(&self, tag: &str) -> Vec<NodeView<'_>> {
        match Selector::parse(tag) {
            Ok(sel) => self
                .document
                .select(&sel)
                .map(|element| NodeView { element })
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Detach every element with the given tag name and return how many
    /// were removed.
    ///
    /// Handles are collected before any node is detached, so removal never
    /// runs against the live selection. A node nested inside an already
    /// removed node is simply detached from its (orphaned) parent.
    pub fn remove_all(&mut self, tag: &str) -> usize {
        let Ok(sel) = Selector::parse(tag) else {
            return 0;
        };
        let ids: Vec<_> = self.document.select(&sel).map(|el| el.id()).collect();

        let mut removed = 0;
        for id in ids {
            if let Some(mut node) = self.document.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }

    /// Serialize the whole tree (doctype included) back to markup.
    pub fn serialize(&self) -> String {
        self.document.html()
    }
}

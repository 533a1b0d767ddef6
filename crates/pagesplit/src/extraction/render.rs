//! Banner-annotated concatenation of fragments into the CSS and JS artifacts.

use super::classify::{ScriptFragment, StyleFragment};
use std::fmt::Write;

pub const NO_CSS_PLACEHOLDER: &str = "/* Aucun CSS trouvé sur cette page */";
pub const NO_JS_PLACEHOLDER: &str = "/* Aucun JavaScript trouvé sur cette page */";

/// Render style fragments, or the CSS placeholder when there are none.
pub fn render_css(fragments: &[StyleFragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        // writing into a String cannot fail
        let _ = match fragment {
            StyleFragment::Inline { index, text } => write!(
                out,
                "/* ========== Style inline #{index} ========== */\n{text}\n\n"
            ),
            StyleFragment::External { href } => {
                write!(out, "/* Fichier CSS externe: {href} */\n\n")
            }
        };
    }
    or_placeholder(out, NO_CSS_PLACEHOLDER)
}

/// Render script fragments, or the JS placeholder when there are none.
/// External scripts are named by source only; their body is never fetched.
pub fn render_js(fragments: &[ScriptFragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        let _ = match fragment {
            ScriptFragment::Inline { index, text } => write!(
                out,
                "/* ========== Script inline #{index} ========== */\n{text}\n\n"
            ),
            ScriptFragment::External { index, src } => write!(
                out,
                "/* ========== Script externe #{index} ========== */\n/* Source: {src} */\n\n"
            ),
        };
    }
    or_placeholder(out, NO_JS_PLACEHOLDER)
}

fn or_placeholder(out: String, placeholder: &str) -> String {
    if out.is_empty() {
        placeholder.to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_css_banners() {
        let css = render_css(&[
            StyleFragment::Inline {
                index: 1,
                text: "body{color:red}".into(),
            },
            StyleFragment::External {
                href: "https://cdn.example.com/site.css".into(),
            },
        ]);
        assert_eq!(
            css,
            "/* ========== Style inline #1 ========== */\nbody{color:red}\n\n\
             /* Fichier CSS externe: https://cdn.example.com/site.css */\n\n"
        );
    }

    #[test]
    fn test_render_js_banners() {
        let js = render_js(&[
            ScriptFragment::Inline {
                index: 1,
                text: "alert(1)".into(),
            },
            ScriptFragment::External {
                index: 1,
                src: "a.js".into(),
            },
        ]);
        assert_eq!(
            js,
            "/* ========== Script inline #1 ========== */\nalert(1)\n\n\
             /* ========== Script externe #1 ========== */\n/* Source: a.js */\n\n"
        );
    }

    #[test]
    fn test_placeholders_when_empty() {
        assert_eq!(render_css(&[]), NO_CSS_PLACEHOLDER);
        assert_eq!(render_js(&[]), NO_JS_PLACEHOLDER);
    }

    #[test]
    fn test_external_only_css_is_not_placeholder() {
        let css = render_css(&[StyleFragment::External {
            href: "a.css".into(),
        }]);
        assert_eq!(css, "/* Fichier CSS externe: a.css */\n\n");
    }
}

//! Shared CLI output formatting with colors and symbols.

use std::io::IsTerminal;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() || std::env::var("PAGESPLIT_NO_COLOR").is_ok() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Print a label/value line.
pub fn print_check(symbol: &str, label: &str, value: &str) {
    eprintln!("    {symbol} {label:<16} {value}");
}

/// Format bytes into human-readable size (e.g., "28.7 KB").
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("PAGESPLIT_QUIET").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

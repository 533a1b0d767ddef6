//! Pagesplit: fetch a web page and split it into three artifacts.
//!
//! - `html`: the page markup with every `style` and `script` element removed
//! - `css`: all inline styles, plus annotations for linked stylesheets
//! - `js`: all inline scripts, plus annotations for external scripts
//!
//! The pipeline is strictly sequential: [`acquisition`] fetches the page,
//! [`parsing`] builds a lenient tree, [`extraction`] classifies and strips
//! nodes, and [`assembly`] packages the result with its counts.
//!
//! ```
//! let result = pagesplit::split_markup("<style>p{}</style><p>hi</p>");
//! assert_eq!(result.stats.css_inline, 1);
//! assert!(!result.html.contains("<style"));
//! ```

pub mod acquisition;
pub mod assembly;
pub mod error;
pub mod extraction;
pub mod parsing;
pub mod pipeline;

pub use acquisition::{FetchConfig, Fetcher, RawDocument};
pub use assembly::{ExtractionResult, ExtractionStats};
pub use error::{FetchError, SplitError, SplitResult};
pub use pipeline::{split_markup, ExtractionRequest, Splitter};

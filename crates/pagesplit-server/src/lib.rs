//! Request/reply boundary and command-line front end for `pagesplit`.
//!
//! - [`server`]: axum endpoint `POST /api/scrape`
//! - [`cli`]: `pagesplit serve | extract | history`
//! - [`history`]: capped, de-duplicated recent-URL history
//! - [`audit`]: JSONL audit log of extraction attempts

pub mod audit;
pub mod cli;
pub mod config;
pub mod history;
pub mod server;

pub use config::AppConfig;
pub use server::{router, AppState};

//! `pagesplit serve`: run the HTTP endpoint until Ctrl-C.

use crate::audit::AuditLogger;
use crate::cli::output::{self, Styled};
use crate::config::AppConfig;
use crate::server::{router, AppState};
use anyhow::{Context, Result};
use pagesplit::Splitter;
use tracing::{info, warn};

pub async fn run(config: &AppConfig) -> Result<()> {
    let s = Styled::new();
    let addr = config.bind_addr()?;

    let splitter = Splitter::new(config.fetch_config()).context("failed to build HTTP client")?;
    let audit = if config.no_audit {
        None
    } else {
        match AuditLogger::open(&config.audit_path()) {
            Ok(logger) => Some(logger),
            Err(e) => {
                warn!("audit log disabled: {e:#}");
                None
            }
        }
    };

    let app = router(AppState::new(splitter, audit));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("starting pagesplit v{} on {addr}", env!("CARGO_PKG_VERSION"));
    if !output::is_quiet() {
        eprintln!(
            "  {} pagesplit v{} listening on {}",
            s.ok_sym(),
            env!("CARGO_PKG_VERSION"),
            s.cyan(&format!("http://{addr}"))
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await
        .context("server shutdown")?;

    if !output::is_quiet() {
        eprintln!("  {} pagesplit stopped.", s.ok_sym());
    }
    Ok(())
}

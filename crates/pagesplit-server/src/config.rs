//! Runtime configuration: command-line flags with `PAGESPLIT_*` environment
//! fallbacks.

use anyhow::{Context, Result};
use clap::Args;
use pagesplit::acquisition::{FetchConfig, DEFAULT_USER_AGENT};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Address the HTTP server listens on (host:port).
    #[arg(long, global = true, env = "PAGESPLIT_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Seconds before a page fetch is abandoned.
    #[arg(long, global = true, env = "PAGESPLIT_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent header sent to remote servers.
    #[arg(long, global = true, env = "PAGESPLIT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// State directory for history and audit log (default: ~/.pagesplit).
    #[arg(long, global = true, env = "PAGESPLIT_HOME")]
    pub home: Option<PathBuf>,

    /// Do not append to the audit log.
    #[arg(long, global = true, env = "PAGESPLIT_NO_AUDIT")]
    pub no_audit: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            home: None,
            no_audit: false,
        }
    }
}

impl AppConfig {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("invalid bind address {}", self.bind))
    }

    pub fn home_dir(&self) -> PathBuf {
        self.home.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".pagesplit")
        })
    }

    pub fn history_path(&self) -> PathBuf {
        self.home_dir().join("history.json")
    }

    pub fn audit_path(&self) -> PathBuf {
        self.home_dir().join("audit.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let fetch = config.fetch_config();
        assert_eq!(fetch.timeout, Duration::from_secs(10));
        assert_eq!(fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_paths_under_home() {
        let config = AppConfig {
            home: Some(PathBuf::from("/var/lib/pagesplit")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.history_path(),
            PathBuf::from("/var/lib/pagesplit/history.json")
        );
        assert_eq!(
            config.audit_path(),
            PathBuf::from("/var/lib/pagesplit/audit.jsonl")
        );
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = AppConfig {
            timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.fetch_config().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_bad_bind_address() {
        let config = AppConfig {
            bind: "nowhere".into(),
            ..AppConfig::default()
        };
        assert!(config.bind_addr().is_err());
    }
}

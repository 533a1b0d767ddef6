//! Single-shot HTTP GET of the page to split.

use crate::error::FetchError;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Browser identification sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upper bound on the whole request, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetcher settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Body of a successful (2xx) response, whatever its declared content type.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// URL as requested.
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl RawDocument {
    /// Whether the server declared an HTML payload. Informational only;
    /// every body is parsed as HTML regardless.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(true)
    }
}

/// HTTP client wrapper. Cheap to clone; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Build a fetcher with its own client.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// GET `url` once. No retry: timeouts, transport failures and non-2xx
    /// statuses all surface as a [`FetchError`].
    pub async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        debug!(%url, timeout = ?self.config.timeout, "fetching page");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "remote server rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        info!(%url, bytes = body.len(), status = status.as_u16(), "page fetched");

        Ok(RawDocument {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        warn!(%url, error = %err, "fetch failed");
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                after: self.config.timeout,
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(content_type: Option<&str>) -> RawDocument {
        RawDocument {
            url: "https://example.com/".to_string(),
            final_url: "https://example.com/".to_string(),
            status: 200,
            content_type: content_type.map(String::from),
            body: String::new(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_is_html() {
        assert!(document(Some("text/html; charset=utf-8")).is_html());
        assert!(document(Some("application/xhtml+xml")).is_html());
        assert!(document(None).is_html());
        assert!(!document(Some("application/json")).is_html());
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_network() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}

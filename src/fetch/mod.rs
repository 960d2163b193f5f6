//! # Page Fetching
//!
//! The asynchronous boundary between navigation and the network. The event
//! loop spawns one fetch task per navigation; the task reports back as a
//! `PageLoaded` or `PageFailed` action tagged with its generation.
//!
//! `PageFetcher` is a trait so tests can inject a stub instead of a real
//! HTTP client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur while fetching a page.
#[derive(Debug)]
pub enum FetchError {
    /// Fetcher misconfigured (relative url with no base url). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-success status.
    Http { status: u16 },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Config(msg) => write!(f, "config error: {msg}"),
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Http { status } => write!(f, "HTTP {status}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the name of the fetcher.
    fn name(&self) -> &str;

    /// Fetches the page at `url` and returns its body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by reqwest.
///
/// Tab urls in the hub config are usually relative paths like `/games.html`;
/// they resolve against the configured base url. Absolute urls pass through.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    fn resolve_url(&self, url: &str) -> Result<String, FetchError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(url.to_string());
        }
        match &self.base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            )),
            None => Err(FetchError::Config(format!(
                "relative url {url} needs a base url (config base_url, KIOSK_BASE_URL, or --base-url)"
            ))),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = self.resolve_url(url)?;
        log::debug!("GET {}", target);

        let response = self
            .client
            .get(&target)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

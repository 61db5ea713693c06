//! HTTP page fetching for Wikipedia
//!
//! This module defines the `PageFetcher` seam used by the scraper and the
//! reqwest-backed `WikiClient` that implements it. One call issues exactly
//! one GET request; there is no retry and no rate limiting.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::{Result, ScraperError};

/// Base URL for English Wikipedia articles
pub const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// Default User-Agent identifying the scraper
const DEFAULT_USER_AGENT: &str = concat!(
    "episode-summaries/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/example/episode-summaries)"
);

/// Retrieves raw page content by URL.
///
/// Implementations must not block the async scheduler; the scraper runs
/// every season fetch concurrently on a single task.
pub trait PageFetcher {
    /// Fetch the body of `url` as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Configuration for the Wikipedia HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds (default: none)
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

/// HTTP client for Wikipedia pages
#[derive(Debug, Clone)]
pub struct WikiClient {
    /// Underlying HTTP client
    client: reqwest::Client,
}

impl WikiClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for WikiClient {
    /// Fetch HTML content from an absolute URL
    ///
    /// # Errors
    /// - `ScraperError::HttpError` - Network failure or unreadable body
    /// - `ScraperError::NotFound` - Server returned 404
    /// - `ScraperError::HttpStatus` - Any other non-success status
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!(bytes = body.len(), "page fetched");
            return Ok(body);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound(url.to_string()));
        }

        Err(ScraperError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

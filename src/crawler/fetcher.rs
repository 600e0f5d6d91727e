//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning parsed HTML documents
//! - Error classification (transport failure vs. non-2xx status)
//!
//! Fetches are never retried; every failure is handed back to the caller,
//! which aborts the run.

use crate::config::{Config, UserAgentConfig};
use crate::{FetchError, TrawlError};
use reqwest::Client;
use scraper::Html;
use std::fmt;
use std::time::Duration;
use url::Url;

/// A source of parsed catalog pages
///
/// The crawl pipeline only ever asks for one document at a time and awaits it
/// before issuing the next request.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetches `url` and parses it as HTML
    async fn fetch_document(&self, url: &Url) -> Result<Html, FetchError>;
}

/// Which part of a run a fetch belongs to, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStage {
    /// The catalog index consulted to resolve category names
    CategoryIndex,
    /// A page of a category listing
    ListingPage,
    /// A detail page fetched to evaluate an `in_stock` filter
    FilterDetail,
    /// A detail page fetched to build a record
    HydrationDetail,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::CategoryIndex => "category index",
            Self::ListingPage => "listing page",
            Self::FilterDetail => "filter detail",
            Self::HydrationDetail => "hydration detail",
        };
        f.write_str(stage)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for a whole request
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches catalog pages over HTTP
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the user-agent and timeout settings
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.catalog.request_timeout_secs);
        Ok(Self::new(build_http_client(&config.user_agent, timeout)?))
    }

    /// GETs `url` and returns the response body
    ///
    /// Any non-2xx status is reported as `FetchError::Status`.
    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(transport)
    }
}

impl DocumentSource for Fetcher {
    async fn fetch_document(&self, url: &Url) -> Result<Html, FetchError> {
        let body = self.fetch_text(url).await?;
        Ok(Html::parse_document(&body))
    }
}

/// Fetches `url` from `source`, tagging failures with the stage they occurred in
pub(crate) async fn fetch_for_stage<S: DocumentSource>(
    source: &S,
    url: &Url,
    stage: FetchStage,
) -> Result<Html, TrawlError> {
    tracing::debug!("Fetching {}: {}", stage, url);
    source
        .fetch_document(url)
        .await
        .map_err(|source| TrawlError::Fetch { stage, source })
}

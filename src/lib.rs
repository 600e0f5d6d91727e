//! Book-Trawler: a catalog crawler for paginated book listings
//!
//! This crate crawls the category pages of a book catalog, accepts listing
//! entries under caller-supplied filters (fetching detail pages when a filter
//! needs data the listing does not show), hydrates full records for the
//! accepted links and produces named, sorted views of the result.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod sort;

use thiserror::Error;

/// Main error type for Book-Trawler operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{stage} fetch failed: {source}")]
    Fetch {
        stage: crawler::FetchStage,
        source: FetchError,
    },

    #[error("Cannot resolve link '{href}' against {base}: {source}")]
    Link {
        base: String,
        href: String,
        source: url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid specification: {0}")]
    Spec(#[from] SpecError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Transport-level failures raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors in caller-supplied filter or sort specifications
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("Unknown filter field '{0}' (expected price, rating or in_stock)")]
    FilterField(String),

    #[error("Unknown comparison operator '{0}' (expected <, > or =)")]
    Operator(String),

    #[error("Filter threshold '{0}' is not an integer")]
    Threshold(String),

    #[error("Unknown sort field '{0}' (expected title, price, star_rating, in_stock or category)")]
    SortField(String),

    #[error("Unknown sort direction '{0}' (expected ascending or descending)")]
    Direction(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run, Coordinator, CrawlRequest, RunOutcome};
pub use record::{Field, Record};
pub use sort::{sort_records, SortSpec, SortedView};

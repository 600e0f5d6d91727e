//! Crawler module for catalog traversal
//!
//! This module contains the crawl-filter pipeline, including:
//! - HTTP fetching and the `DocumentSource` seam
//! - Listing-page parsing
//! - Pagination and detail-link resolution
//! - Category-name resolution
//! - Filter evaluation
//! - Overall run coordination

mod categories;
mod coordinator;
mod cursor;
mod fetcher;
mod filters;
mod parser;

pub use categories::{CategoryResolution, CategoryResolver, ResolvedCategory, ALL_BOOKS};
pub use coordinator::{
    CategoryOutcome, Coordinator, CrawlRequest, RunContext, RunOutcome, RunStats,
};
pub use cursor::{first_listing_page, LinkCursor};
pub use fetcher::{build_http_client, DocumentSource, FetchStage, Fetcher};
pub use filters::{Comparison, Evaluation, FilterClause, FilterField, FilterSpec};
pub use parser::{parse_listing, parse_listing_html, ListingEntry, ListingPage};

use crate::config::Config;
use crate::TrawlError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for a run. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Resolve the requested categories
/// 3. Walk listing pages, applying filters until the quota is met
/// 4. Fetch detail pages and build records for accepted links
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `request` - Quota, filters and category names
pub async fn run(config: &Config, request: &CrawlRequest) -> Result<RunOutcome, TrawlError> {
    Coordinator::new(config)?.run(request).await
}

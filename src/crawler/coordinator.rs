//! Crawler coordinator - main crawl orchestration logic
//!
//! One run goes through three phases, strictly one fetch at a time:
//! 1. Resolve the requested category names to listing URLs
//! 2. Walk each category's pages, accepting entries that pass the filters
//!    until the quota is used up or every category is exhausted
//! 3. Fetch the detail page of every accepted link and build its record
//!
//! All accumulated state lives in a [`RunContext`] owned by the run, so
//! separate runs never share results.

use crate::config::{validate, Config};
use crate::crawler::categories::{CategoryResolver, ResolvedCategory};
use crate::crawler::cursor::LinkCursor;
use crate::crawler::fetcher::{fetch_for_stage, DocumentSource, FetchStage, Fetcher};
use crate::crawler::filters::FilterSpec;
use crate::crawler::parser::parse_listing;
use crate::record::Record;
use crate::TrawlError;
use url::Url;

/// What a caller asks a run to do
#[derive(Debug, Clone, Default)]
pub struct CrawlRequest {
    /// Maximum number of accepted links across all categories
    pub quota: usize,

    /// Filters every accepted entry must pass
    pub filters: FilterSpec,

    /// Category display names; empty means the whole catalog
    pub categories: Vec<String>,
}

/// Fetch counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub category_index_fetches: usize,
    pub listing_pages: usize,
    pub filter_fetches: usize,
    pub detail_fetches: usize,
}

impl RunStats {
    pub fn total_fetches(&self) -> usize {
        self.category_index_fetches + self.listing_pages + self.filter_fetches + self.detail_fetches
    }
}

/// How a category's pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// The quota ran out; no further categories are crawled
    QuotaMet,
    /// The last page had no "next" control
    Exhausted,
}

/// Mutable state of a single run
#[derive(Debug)]
pub struct RunContext {
    remaining: usize,
    accepted_links: Vec<Url>,
    records: Vec<Record>,
    stats: RunStats,
}

impl RunContext {
    pub fn new(quota: usize) -> Self {
        Self {
            remaining: quota,
            accepted_links: Vec::new(),
            records: Vec::new(),
            stats: RunStats::default(),
        }
    }

    /// Quota left to fill
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once the quota is used up
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn accepted_links(&self) -> &[Url] {
        &self.accepted_links
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn accept(&mut self, link: Url) {
        tracing::debug!("Accepted {} ({} left)", link, self.remaining.saturating_sub(1));
        self.accepted_links.push(link);
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn into_outcome(self, unresolved_categories: Vec<String>) -> RunOutcome {
        RunOutcome {
            accepted_links: self.accepted_links,
            records: self.records,
            unresolved_categories,
            stats: self.stats,
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Detail-page URLs of accepted entries, in acceptance order
    pub accepted_links: Vec<Url>,

    /// One record per accepted link, same order
    pub records: Vec<Record>,

    /// Requested category names missing from the catalog index
    pub unresolved_categories: Vec<String>,

    pub stats: RunStats,
}

/// Main crawler coordinator structure
pub struct Coordinator<S = Fetcher> {
    source: S,
    index_url: Url,
    catalogue: Url,
    default_listing: Url,
}

impl Coordinator<Fetcher> {
    /// Creates a coordinator fetching over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration is valid and the client was built
    /// * `Err(TrawlError)` - Invalid configuration or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, TrawlError> {
        validate(config)?;
        let fetcher = Fetcher::from_config(config)?;
        Self::with_source(config, fetcher)
    }
}

impl<S: DocumentSource> Coordinator<S> {
    /// Creates a coordinator reading pages from `source`
    pub fn with_source(config: &Config, source: S) -> Result<Self, TrawlError> {
        Ok(Self {
            source,
            index_url: config.catalog.base()?,
            catalogue: config.catalog.catalogue_root()?,
            default_listing: config.catalog.default_listing_url()?,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs a complete crawl
    ///
    /// A quota of zero returns immediately without any fetch. Any fetch
    /// failure aborts the run; the error names the stage and URL.
    pub async fn run(&self, request: &CrawlRequest) -> Result<RunOutcome, TrawlError> {
        let mut ctx = RunContext::new(request.quota);

        if ctx.is_complete() {
            tracing::info!("Quota is zero, nothing to crawl");
            return Ok(ctx.into_outcome(Vec::new()));
        }

        let start_time = std::time::Instant::now();
        tracing::info!(
            "Starting crawl: quota {}, {} filter(s), {} category name(s)",
            request.quota,
            request.filters.clauses().len(),
            request.categories.len()
        );

        let resolution = CategoryResolver::new(&self.source, &self.index_url, &self.default_listing)
            .resolve(&request.categories)
            .await?;
        ctx.stats.category_index_fetches = request.categories.len();

        for category in &resolution.categories {
            match self.crawl_category(category, &request.filters, &mut ctx).await? {
                CategoryOutcome::QuotaMet => {
                    tracing::info!("Quota met in category '{}'", category.name);
                    break;
                }
                CategoryOutcome::Exhausted => {
                    tracing::info!(
                        "Category '{}' exhausted, {} of quota left",
                        category.name,
                        ctx.remaining
                    );
                }
            }
        }

        self.hydrate(&mut ctx).await?;

        tracing::info!(
            "Crawl completed: {} links accepted, {} records, {} fetches in {:?}",
            ctx.accepted_links.len(),
            ctx.records.len(),
            ctx.stats.total_fetches(),
            start_time.elapsed()
        );

        Ok(ctx.into_outcome(resolution.unresolved))
    }

    /// Walks one category's listing pages
    async fn crawl_category(
        &self,
        category: &ResolvedCategory,
        filters: &FilterSpec,
        ctx: &mut RunContext,
    ) -> Result<CategoryOutcome, TrawlError> {
        let mut cursor = LinkCursor::new(category.url.clone(), self.catalogue.clone());
        tracing::info!("Crawling category '{}' from {}", category.name, cursor.current());

        loop {
            let page = {
                let document =
                    fetch_for_stage(&self.source, cursor.current(), FetchStage::ListingPage).await?;
                parse_listing(&document)
            };
            ctx.stats.listing_pages += 1;

            for entry in &page.entries {
                let detail_url = cursor.detail_url(&entry.href)?;
                let evaluation = filters.evaluate(entry, &detail_url, &self.source).await?;
                ctx.stats.filter_fetches += evaluation.detail_fetches;

                if evaluation.accepted {
                    ctx.accept(detail_url);
                    if ctx.is_complete() {
                        return Ok(CategoryOutcome::QuotaMet);
                    }
                }
            }

            match page.next_href {
                Some(href) => {
                    let next = cursor.advance(&href)?;
                    tracing::debug!("Next page: {}", next);
                }
                None => return Ok(CategoryOutcome::Exhausted),
            }
        }
    }

    /// Builds a record for every accepted link, in order
    async fn hydrate(&self, ctx: &mut RunContext) -> Result<(), TrawlError> {
        tracing::info!("Fetching {} detail page(s)", ctx.accepted_links.len());

        for link in &ctx.accepted_links {
            let document = fetch_for_stage(&self.source, link, FetchStage::HydrationDetail).await?;
            ctx.records.push(Record::from_document(&document));
            ctx.stats.detail_fetches += 1;
        }

        Ok(())
    }
}

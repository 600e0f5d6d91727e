//! Category resolution
//!
//! Maps human-readable category names ("Travel", "Mystery") to the first
//! listing page of that category by looking them up in the catalog index.

use crate::crawler::fetcher::{fetch_for_stage, DocumentSource, FetchStage};
use crate::TrawlError;
use scraper::{Html, Selector};
use url::Url;

const CATEGORY_LINK: &str = "a[href]";

/// Name reported for the listing crawled when no categories are requested
pub const ALL_BOOKS: &str = "All books";

/// A category name together with its first listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub name: String,
    pub url: Url,
}

/// Result of resolving a set of category names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryResolution {
    /// Resolved categories, in request order
    pub categories: Vec<ResolvedCategory>,

    /// Requested names with no matching link in the index
    pub unresolved: Vec<String>,
}

/// Resolves category names against the catalog index
pub struct CategoryResolver<'a, S> {
    source: &'a S,
    index_url: &'a Url,
    default_listing: &'a Url,
}

impl<'a, S: DocumentSource> CategoryResolver<'a, S> {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `source` - Where index pages are fetched from
    /// * `index_url` - Catalog page listing every category
    /// * `default_listing` - Listing used when no names are requested
    pub fn new(source: &'a S, index_url: &'a Url, default_listing: &'a Url) -> Self {
        Self {
            source,
            index_url,
            default_listing,
        }
    }

    /// Resolves `names` in order
    ///
    /// The index is fetched afresh for every name. An empty request skips the
    /// index entirely and yields the "all books" listing. A name must equal
    /// the trimmed link text exactly (case and surrounding whitespace
    /// included); names without a match are collected in `unresolved`
    /// rather than failing the run.
    pub async fn resolve(&self, names: &[String]) -> Result<CategoryResolution, TrawlError> {
        let mut resolution = CategoryResolution::default();

        if names.is_empty() {
            resolution.categories.push(ResolvedCategory {
                name: ALL_BOOKS.to_string(),
                url: self.default_listing.clone(),
            });
            return Ok(resolution);
        }

        for name in names {
            let url = {
                let index =
                    fetch_for_stage(self.source, self.index_url, FetchStage::CategoryIndex).await?;
                find_category_link(&index, self.index_url, name)?
            };

            match url {
                Some(url) => {
                    tracing::debug!("Category '{}' resolved to {}", name, url);
                    resolution.categories.push(ResolvedCategory {
                        name: name.clone(),
                        url,
                    });
                }
                None => {
                    tracing::warn!("Category '{}' not found in catalog index", name);
                    resolution.unresolved.push(name.clone());
                }
            }
        }

        Ok(resolution)
    }
}

/// Finds the first link in `index` whose text is exactly `name`
fn find_category_link(index: &Html, index_url: &Url, name: &str) -> Result<Option<Url>, TrawlError> {
    let Ok(selector) = Selector::parse(CATEGORY_LINK) else {
        return Ok(None);
    };

    let href = index
        .select(&selector)
        .find(|link| link.text().collect::<String>().trim() == name)
        .and_then(|link| link.value().attr("href"));

    match href {
        Some(href) => index_url
            .join(href.trim())
            .map(Some)
            .map_err(|source| TrawlError::Link {
                base: index_url.to_string(),
                href: href.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

//! Link cursor for paginated listings
//!
//! The cursor holds the URL of the listing page currently being crawled.
//! Each "next" link is resolved against that page, so pagination can go
//! arbitrarily deep without re-deriving a base from the category root.

use crate::TrawlError;
use url::Url;

const INDEX_PAGE: &str = "index.html";

/// Tracks the current listing page of one category
#[derive(Debug, Clone)]
pub struct LinkCursor {
    current: Url,
    catalogue: Url,
}

impl LinkCursor {
    /// Starts a cursor on the first listing page of `category_root`
    ///
    /// `catalogue` is the prefix detail links resolve against.
    pub fn new(category_root: Url, catalogue: Url) -> Self {
        Self {
            current: first_listing_page(category_root),
            catalogue,
        }
    }

    /// The listing page the cursor points at
    pub fn current(&self) -> &Url {
        &self.current
    }

    /// Moves to the page a "next" control points at
    ///
    /// `page-2.html` on `.../travel_2/index.html` gives `.../travel_2/page-2.html`;
    /// `page-3.html` on that page gives `.../travel_2/page-3.html`.
    pub fn advance(&mut self, next_href: &str) -> Result<&Url, TrawlError> {
        self.current = join(&self.current, next_href)?;
        Ok(&self.current)
    }

    /// Absolute detail-page URL for a link found in a listing entry
    ///
    /// Listing links climb out of the category directory
    /// (`../../../book_1/index.html`); the leading `../` hops are dropped and
    /// the rest is resolved against the catalogue prefix.
    pub fn detail_url(&self, href: &str) -> Result<Url, TrawlError> {
        if let Ok(absolute) = Url::parse(href) {
            return Ok(absolute);
        }

        let mut relative = href;
        loop {
            if let Some(rest) = relative.strip_prefix("../") {
                relative = rest;
            } else if let Some(rest) = relative.strip_prefix("./") {
                relative = rest;
            } else {
                break;
            }
        }

        join(&self.catalogue, relative)
    }
}

/// First listing page of a category
///
/// Category roots given as directories (`.../travel_2/`) map to their
/// `index.html`; anything else already names a page.
pub fn first_listing_page(category_root: Url) -> Url {
    if category_root.path().ends_with('/') {
        if let Ok(index) = category_root.join(INDEX_PAGE) {
            return index;
        }
    }
    category_root
}

fn join(base: &Url, href: &str) -> Result<Url, TrawlError> {
    base.join(href).map_err(|source| TrawlError::Link {
        base: base.to_string(),
        href: href.to_string(),
        source,
    })
}

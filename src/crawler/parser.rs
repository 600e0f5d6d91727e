//! Listing-page parser
//!
//! A listing page shows a grid of product summaries and, unless it is the last
//! page of its category, a "next" pagination control. Only the fields visible
//! in the summary are read here; everything else requires the detail page.

use crate::record::extract::{price_within, rating_within, select_first};
use scraper::{Html, Selector};

const ENTRY: &str = "li.col-xs-6.col-sm-4.col-md-3.col-lg-3";
const ENTRY_LINK: &str = "a[href]";
const NEXT_PAGE: &str = "li.next a[href]";

/// One product summary on a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    /// Detail-page link exactly as written in the markup
    pub href: String,

    /// Price shown in the summary
    pub price: Option<f64>,

    /// Star rating shown in the summary
    pub rating: Option<u8>,
}

/// Extracted content of one listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    /// Entries in document order
    pub entries: Vec<ListingEntry>,

    /// Target of the "next" control, if the page has one
    pub next_href: Option<String>,
}

/// Parses a listing page
///
/// Entries without a link cannot be followed and are skipped.
pub fn parse_listing(document: &Html) -> ListingPage {
    let mut entries = Vec::new();

    if let Ok(entry_selector) = Selector::parse(ENTRY) {
        for (index, element) in document.select(&entry_selector).enumerate() {
            let href = select_first(element, ENTRY_LINK)
                .and_then(|link| link.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty());

            match href {
                Some(href) => entries.push(ListingEntry {
                    href: href.to_string(),
                    price: price_within(element),
                    rating: rating_within(element),
                }),
                None => tracing::warn!("Listing entry {} has no detail link, skipping", index),
            }
        }
    }

    let next_href = select_first(document.root_element(), NEXT_PAGE)
        .and_then(|link| link.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty());

    ListingPage { entries, next_href }
}

/// Convenience wrapper parsing raw HTML
pub fn parse_listing_html(html: &str) -> ListingPage {
    parse_listing(&Html::parse_document(html))
}

//! Field extraction from parsed catalog pages
//!
//! Every extractor is isolated: a missing element or unparseable text yields
//! `None`/`Field::Missing` for that field only. Nothing in here returns an
//! error.

use crate::record::Field;
use scraper::{ElementRef, Html, Selector};

const TITLE: &str = "h1";
const DESCRIPTION: &str = "p:not([class])";
pub(crate) const PRICE: &str = "p.price_color";
pub(crate) const STAR_RATING: &str = "p.star-rating";
const IN_STOCK: &str = "p.instock.availability";
const CATEGORY: &str = r#"a[href*="category/books/"]"#;

/// Currency prefixes stripped before parsing a price
///
/// `Â£` is how the pound sign reads when a UTF-8 page is decoded as Latin-1.
const CURRENCY_PREFIXES: [&str; 3] = ["Â£", "£", "$"];

/// Word ratings used in the `star-rating` class
const RATING_WORDS: [(&str, u8); 5] = [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)];

/// Returns the first element under `root` matching `selector`
pub(crate) fn select_first<'a>(root: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    root.select(&selector).next()
}

/// Collects and trims the text of an element, treating blank text as absent
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub fn extract_title(document: &Html) -> Field<String> {
    select_first(document.root_element(), TITLE)
        .and_then(element_text)
        .into()
}

pub fn extract_description(document: &Html) -> Field<String> {
    select_first(document.root_element(), DESCRIPTION)
        .and_then(element_text)
        .into()
}

pub fn extract_price(document: &Html) -> Field<f64> {
    price_within(document.root_element()).into()
}

pub fn extract_star_rating(document: &Html) -> Field<u8> {
    rating_within(document.root_element()).into()
}

pub fn extract_in_stock(document: &Html) -> Field<u32> {
    select_first(document.root_element(), IN_STOCK)
        .map(|element| element.text().collect::<String>())
        .and_then(|text| parse_stock(&text))
        .into()
}

/// The breadcrumb category, e.g. "Travel"
///
/// Only links below `category/books/` qualify, which skips the "Books" root
/// crumb (`category/books_1/`).
pub fn extract_category(document: &Html) -> Field<String> {
    select_first(document.root_element(), CATEGORY)
        .and_then(element_text)
        .into()
}

/// Reads the price shown anywhere below `root`
pub(crate) fn price_within(root: ElementRef<'_>) -> Option<f64> {
    select_first(root, PRICE)
        .and_then(element_text)
        .and_then(|text| parse_price(&text))
}

/// Reads the star rating shown anywhere below `root`
pub(crate) fn rating_within(root: ElementRef<'_>) -> Option<u8> {
    let class = select_first(root, STAR_RATING)?.value().attr("class")?;
    // class="star-rating Three"
    class.split_whitespace().nth(1).and_then(rating_from_word)
}

/// Parses a price such as `£51.77`
///
/// Negative or non-finite amounts are rejected.
pub fn parse_price(text: &str) -> Option<f64> {
    let mut amount = text.trim();
    for prefix in CURRENCY_PREFIXES {
        if let Some(rest) = amount.strip_prefix(prefix) {
            amount = rest.trim_start();
            break;
        }
    }

    amount
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Maps a rating word ("One" .. "Five") to its number
pub fn rating_from_word(word: &str) -> Option<u8> {
    RATING_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, stars)| *stars)
}

/// Keeps only the digits of an availability text such as "In stock (22 available)"
pub fn parse_stock(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

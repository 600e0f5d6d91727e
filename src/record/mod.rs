//! Product records built from catalog detail pages
//!
//! A `Record` is constructed once from a fully fetched detail page and never
//! changes afterwards. Each of its six fields is extracted independently; an
//! absent or malformed element only turns that field into the "N/A" sentinel.

pub mod extract;
mod field;

pub use field::{Field, SENTINEL};

use scraper::Html;
use serde::Serialize;
use std::fmt;

/// One book, as described by its detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    title: Field<String>,
    description: Field<String>,
    price: Field<f64>,
    star_rating: Field<u8>,
    in_stock: Field<u32>,
    category: Field<String>,
}

impl Record {
    /// Creates a record from already-resolved fields
    pub fn new(
        title: Field<String>,
        description: Field<String>,
        price: Field<f64>,
        star_rating: Field<u8>,
        in_stock: Field<u32>,
        category: Field<String>,
    ) -> Self {
        Self {
            title,
            description,
            price,
            star_rating,
            in_stock,
            category,
        }
    }

    /// Builds a record from a parsed detail page
    pub fn from_document(document: &Html) -> Self {
        Self {
            title: extract::extract_title(document),
            description: extract::extract_description(document),
            price: extract::extract_price(document),
            star_rating: extract::extract_star_rating(document),
            in_stock: extract::extract_in_stock(document),
            category: extract::extract_category(document),
        }
    }

    /// Parses `html` and builds a record from it
    pub fn from_html(html: &str) -> Self {
        Self::from_document(&Html::parse_document(html))
    }

    pub fn title(&self) -> &Field<String> {
        &self.title
    }

    pub fn description(&self) -> &Field<String> {
        &self.description
    }

    pub fn price(&self) -> &Field<f64> {
        &self.price
    }

    pub fn star_rating(&self) -> &Field<u8> {
        &self.star_rating
    }

    pub fn in_stock(&self) -> &Field<u32> {
        &self.in_stock
    }

    pub fn category(&self) -> &Field<String> {
        &self.category
    }

    /// Key used when persisting: the title, or the sentinel
    pub fn title_key(&self) -> String {
        self.title.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title : {}", self.title)?;
        writeln!(f, "Star rating :  {}", self.star_rating)?;
        match &self.price {
            Field::Value(price) => writeln!(f, "Price :  {:.2}", price)?,
            Field::Missing => writeln!(f, "Price :  {}", SENTINEL)?,
        }
        writeln!(f, "In_stock : {}", self.in_stock)?;
        writeln!(f, "Category : {}", self.category)?;
        writeln!(f, "Description : {}", self.description)
    }
}

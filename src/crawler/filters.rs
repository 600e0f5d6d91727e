//! Listing filters
//!
//! A filter specification is a conjunction of `(field, operator, threshold)`
//! clauses evaluated against a listing entry. Price and rating are read from
//! the listing markup. Stock counts only appear on detail pages, so an
//! `in_stock` clause fetches the entry's detail page; that fetch happens at
//! most once per evaluation no matter how many `in_stock` clauses there are.

use crate::crawler::fetcher::{fetch_for_stage, DocumentSource, FetchStage};
use crate::crawler::parser::ListingEntry;
use crate::record::Record;
use crate::{SpecError, TrawlError};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Fields a filter clause can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Price,
    Rating,
    InStock,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::InStock => "in_stock",
        }
    }

    /// True if the field is only available on the detail page
    pub fn needs_detail_page(&self) -> bool {
        matches!(self, Self::InStock)
    }
}

impl FromStr for FilterField {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "in_stock" => Ok(Self::InStock),
            other => Err(SpecError::FilterField(other.to_string())),
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    LessThan,
    GreaterThan,
    Equal,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Equal => "=",
        }
    }

    /// Applies the operator to `value` and `threshold`
    pub fn holds(&self, value: f64, threshold: i64) -> bool {
        let threshold = threshold as f64;
        match self {
            Self::LessThan => value < threshold,
            Self::GreaterThan => value > threshold,
            Self::Equal => value == threshold,
        }
    }
}

impl FromStr for Comparison {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(Self::LessThan),
            ">" => Ok(Self::GreaterThan),
            "=" => Ok(Self::Equal),
            other => Err(SpecError::Operator(other.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(field, operator, threshold)` test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterClause {
    pub field: FilterField,
    pub comparison: Comparison,
    pub threshold: i64,
}

impl FilterClause {
    pub fn new(field: FilterField, comparison: Comparison, threshold: i64) -> Self {
        Self {
            field,
            comparison,
            threshold,
        }
    }

    /// Parses a clause from its three textual parts, e.g. `("price", "<", "20")`
    pub fn parse(field: &str, comparison: &str, threshold: &str) -> Result<Self, SpecError> {
        let threshold = threshold
            .trim()
            .parse::<i64>()
            .map_err(|_| SpecError::Threshold(threshold.to_string()))?;

        Ok(Self::new(field.parse()?, comparison.parse()?, threshold))
    }

    /// Tests a resolved value; an unresolved value never matches
    pub fn matches(&self, value: Option<f64>) -> bool {
        value.is_some_and(|value| self.comparison.holds(value, self.threshold))
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.comparison, self.threshold)
    }
}

/// Outcome of evaluating one listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub accepted: bool,

    /// Detail pages fetched while evaluating (0 or 1)
    pub detail_fetches: usize,
}

/// Conjunction of filter clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    clauses: Vec<FilterClause>,
}

impl FilterSpec {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }

    /// Builds a specification from textual triples
    pub fn parse<I, S>(triples: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = [S; 3]>,
        S: AsRef<str>,
    {
        triples
            .into_iter()
            .map(|[field, op, threshold]| {
                FilterClause::parse(field.as_ref(), op.as_ref(), threshold.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates `entry`, fetching its detail page only if a clause needs it
    ///
    /// Clauses are tested in order and evaluation stops at the first failing
    /// one, so a cheap listing-field clause placed first can spare the fetch.
    pub async fn evaluate<S: DocumentSource>(
        &self,
        entry: &ListingEntry,
        detail_url: &Url,
        source: &S,
    ) -> Result<Evaluation, TrawlError> {
        let mut detail: Option<Record> = None;
        let mut detail_fetches = 0;

        for clause in &self.clauses {
            let value = match clause.field {
                FilterField::Price => entry.price,
                FilterField::Rating => entry.rating.map(f64::from),
                FilterField::InStock => {
                    if detail.is_none() {
                        let document =
                            fetch_for_stage(source, detail_url, FetchStage::FilterDetail).await?;
                        detail = Some(Record::from_document(&document));
                        detail_fetches += 1;
                    }
                    detail
                        .as_ref()
                        .and_then(|record| record.in_stock().value().copied())
                        .map(f64::from)
                }
            };

            if !clause.matches(value) {
                tracing::trace!("{} rejected by '{}' (value {:?})", entry.href, clause, value);
                return Ok(Evaluation {
                    accepted: false,
                    detail_fetches,
                });
            }
        }

        Ok(Evaluation {
            accepted: true,
            detail_fetches,
        })
    }

    /// Convenience wrapper around [`FilterSpec::evaluate`]
    pub async fn accepts<S: DocumentSource>(
        &self,
        entry: &ListingEntry,
        detail_url: &Url,
        source: &S,
    ) -> Result<bool, TrawlError> {
        Ok(self.evaluate(entry, detail_url, source).await?.accepted)
    }
}

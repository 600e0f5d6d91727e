//! Sort keys: which record field a view orders by, and in which direction

use crate::record::Record;
use crate::SpecError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Record fields a view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Price,
    StarRating,
    InStock,
    Category,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::StarRating => "star_rating",
            Self::InStock => "in_stock",
            Self::Category => "category",
        }
    }

    /// Ascending order of two records on this field
    ///
    /// Sentinel values compare greater than any resolved value.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::Title => a.title().cmp_with(b.title(), |x, y| x.cmp(y)),
            Self::Price => a.price().cmp_with(b.price(), |x, y| x.total_cmp(y)),
            Self::StarRating => a.star_rating().cmp_with(b.star_rating(), |x, y| x.cmp(y)),
            Self::InStock => a.in_stock().cmp_with(b.in_stock(), |x, y| x.cmp(y)),
            Self::Category => a.category().cmp_with(b.category(), |x, y| x.cmp(y)),
        }
    }
}

impl FromStr for SortField {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            "star_rating" => Ok(Self::StarRating),
            "in_stock" => Ok(Self::InStock),
            "category" => Ok(Self::Category),
            other => Err(SpecError::SortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl FromStr for Direction {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(SpecError::Direction(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(field, direction)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parses a key from its textual parts, e.g. `("price", "descending")`
    pub fn parse(field: &str, direction: &str) -> Result<Self, SpecError> {
        Ok(Self::new(field.parse()?, direction.parse()?))
    }

    /// View label, e.g. "Sorted by price - descending"
    pub fn label(&self) -> String {
        format!("Sorted by {} - {}", self.field, self.direction)
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::new(SortField::Title, Direction::Ascending)
    }
}

/// Ordered list of sort keys, one view each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Builds a specification from textual pairs
    pub fn parse<I, S>(pairs: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = [S; 2]>,
        S: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|[field, direction]| SortKey::parse(field.as_ref(), direction.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Field values that may be unresolved
///
/// Every record field is either a typed value or the "N/A" sentinel. The
/// sentinel is a distinct variant rather than a magic string, so comparisons
/// and sorting treat it uniformly.
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Text written wherever a field could not be resolved
pub const SENTINEL: &str = "N/A";

/// A record field: a resolved value or the sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The field was extracted and parsed
    Value(T),
    /// The source element was absent or malformed
    Missing,
}

impl<T> Field<T> {
    /// Returns the resolved value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }

    /// Returns true for the sentinel
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Orders two fields with `cmp`, placing the sentinel after every value
    ///
    /// This is a total order as long as `cmp` is one: two sentinels compare
    /// equal, so stable sorts keep their input order.
    pub fn cmp_with<F>(&self, other: &Self, cmp: F) -> Ordering
    where
        F: FnOnce(&T, &T) -> Ordering,
    {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => cmp(a, b),
            (Self::Value(_), Self::Missing) => Ordering::Less,
            (Self::Missing, Self::Value(_)) => Ordering::Greater,
            (Self::Missing, Self::Missing) => Ordering::Equal,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => v.fmt(f),
            Self::Missing => f.write_str(SENTINEL),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Missing => serializer.serialize_str(SENTINEL),
        }
    }
}

//! Sorted views over a run's records
//!
//! Each sort key produces one named view of all records. Without keys a
//! single default view (title, ascending) is produced.

mod keys;
mod views;

pub use keys::{Direction, SortField, SortKey, SortSpec};
pub use views::{sort_by, sort_records, SortedView, DEFAULT_LABEL};

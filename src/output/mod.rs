//! Output module for persisting and presenting run results
//!
//! This module handles:
//! - Writing records to a JSON file keyed by title
//! - Reading the titles back from a previously written file
//! - Formatting sorted views as plain text

mod json;
mod report;

pub use json::{load_titles, records_to_json, write_records};
pub use report::{format_record_count, format_views, print_views};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Expected a JSON object in {path}")]
    NotAnObject { path: String },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

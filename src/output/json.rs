//! JSON persistence
//!
//! The persisted file is a single object mapping each title to the record's
//! fields. Titles are the keys, so of two records sharing a title only the
//! later one survives.

use crate::output::{OutputError, OutputResult};
use crate::record::Record;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Builds the title → record object
pub fn records_to_json(records: &[Record]) -> Map<String, Value> {
    let mut books = Map::new();

    for record in records {
        let title = record.title_key();
        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Skipping '{}': {}", title, e);
                continue;
            }
        };

        if books.insert(title.clone(), value).is_some() {
            tracing::warn!("Duplicate title '{}', keeping the later record", title);
        }
    }

    books
}

/// Writes `records` to `path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(usize)` - Number of entries written (after duplicate titles collapse)
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_records(path: &Path, records: &[Record]) -> OutputResult<usize> {
    let io_error = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    let books = records_to_json(records);
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    books
        .serialize(&mut serializer)
        .map_err(|source| OutputError::Json {
            path: path.display().to_string(),
            source,
        })?;
    writer.flush().map_err(io_error)?;

    tracing::info!("Wrote {} record(s) to {}", books.len(), path.display());
    Ok(books.len())
}

/// Lists the titles stored in a previously written file
pub fn load_titles(path: &Path) -> OutputResult<Vec<String>> {
    let file = File::open(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| OutputError::Json {
            path: path.display().to_string(),
            source,
        })?;

    match value {
        Value::Object(books) => Ok(books.into_iter().map(|(title, _)| title).collect()),
        _ => Err(OutputError::NotAnObject {
            path: path.display().to_string(),
        }),
    }
}

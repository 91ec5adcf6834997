#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset readers for the borough open data exports.
//!
//! Each reader consumes a file already downloaded from the open data portal
//! (a Socrata-style JSON array of string-valued records, or a CSV table) and
//! produces typed model values. Records that cannot be used (missing or
//! unparseable coordinates or dates) are dropped and counted, never
//! silently included.

pub mod collisions;
pub mod crime;
pub mod parsing;
pub mod reference;

use std::path::Path;

use borough_trends_models::Event;

/// Errors that can occur while reading an input dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An expected column is absent from an input dataset.
    #[error("Dataset '{dataset}' is missing expected column '{column}'")]
    MissingColumn {
        /// Name of the offending dataset.
        dataset: String,
        /// The absent column.
        column: String,
    },

    /// A reference dataset produced no usable rows.
    #[error("Reference dataset '{dataset}' produced no rows")]
    EmptyReference {
        /// Name of the offending dataset.
        dataset: String,
    },

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The result of reading one event dataset.
#[derive(Debug)]
pub struct DatasetLoad {
    /// Events that parsed cleanly.
    pub events: Vec<Event>,
    /// Records dropped for missing/unparseable coordinates or dates.
    pub skipped: usize,
}

/// Reads a JSON file containing an array of records, as exported by the
/// open data portal's API.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or is not a JSON
/// array.
pub fn read_record_array(path: &Path) -> Result<Vec<serde_json::Value>, SourceError> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    Ok(records)
}

/// Validates that the first record of a dataset carries every required
/// column. Socrata exports omit null fields per record, so this is a
/// schema-presence check, not a per-record one.
///
/// # Errors
///
/// Returns [`SourceError::MissingColumn`] naming the first absent column.
pub fn require_columns(
    records: &[serde_json::Value],
    dataset: &str,
    columns: &[&str],
) -> Result<(), SourceError> {
    let Some(first) = records.first().and_then(serde_json::Value::as_object) else {
        return Ok(());
    };
    for column in columns {
        if !first.contains_key(*column) {
            return Err(SourceError::MissingColumn {
                dataset: dataset.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

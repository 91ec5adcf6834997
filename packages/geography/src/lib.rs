#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Area index, nearest-area resolver, and boundary polygon conversion.
//!
//! The index holds every small area's representative point in memory and is
//! built once per run; the resolver assigns each event the code of its
//! nearest area by brute-force scan. At this scale (hundreds of areas, up
//! to around a million events) the scan is preferred over a spatial index
//! structure for its simplicity.

pub mod boundary;
pub mod index;
pub mod progress;
pub mod resolve;

pub use index::AreaIndex;
pub use resolve::{Resolution, resolve_events};

use thiserror::Error;

/// Errors that can occur while building geographic structures.
#[derive(Debug, Error)]
pub enum GeoError {
    /// An area index cannot be built from zero areas.
    #[error("Cannot build an area index from an empty area list")]
    EmptyAreaIndex,

    /// Two areas in the reference data share a code.
    #[error("Duplicate area code in reference data: {code}")]
    DuplicateAreaCode {
        /// The repeated code.
        code: String,
    },

    /// A boundary dataset produced no usable polygons.
    #[error("Boundary dataset '{dataset}' produced no usable polygons")]
    EmptyBoundaries {
        /// Name of the offending dataset.
        dataset: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

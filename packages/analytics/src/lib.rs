#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Temporal aggregation and gap-filling for resolved events.
//!
//! Every function here is a pure transformation from immutable slices to a
//! new, key-sorted vector: groups accumulate in ordered maps and the output
//! table is built once at the end. The aggregators assume resolver output
//! is already valid and do not re-validate coordinates or dates.

pub mod categorical;
pub mod latest;
pub mod spatial;

pub use categorical::category_trends;
pub use latest::fill_latest;
pub use spatial::{join_trends, quarterly_counts};

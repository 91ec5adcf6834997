#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch pipeline for the borough trends reports.
//!
//! [`run`] sequences the stages explicitly: read reference data, build the
//! area index, read events, resolve, aggregate, join, gap-fill. Only then
//! does it write the output tables, so a failed run never partially
//! overwrites an earlier run's outputs.

pub mod export;
pub mod progress;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use borough_trends_analytics::{category_trends, fill_latest, join_trends, quarterly_counts};
use borough_trends_geography::progress::ProgressCallback;
use borough_trends_geography::{AreaIndex, GeoError, boundary, resolve_events};
use borough_trends_models::EventKind;
use borough_trends_source::{SourceError, collisions, crime, reference};

/// Errors that can abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An input dataset could not be read.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The area index or boundary data could not be built.
    #[error("Geography error: {0}")]
    Geo(#[from] GeoError),

    /// An output table could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (output directory or file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input and output locations for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Road collision JSON export.
    pub collisions: PathBuf,
    /// Crime outcomes JSON export.
    pub crimes: PathBuf,
    /// IMD JSON export for the local authority.
    pub imd: PathBuf,
    /// Population CSV (`lsoa_code`, `all_ages`).
    pub population: PathBuf,
    /// Optional boundary JSON export; enables the GeoJSON output.
    pub boundaries: Option<PathBuf>,
    /// Directory the output tables are written into.
    pub out_dir: PathBuf,
    /// Cap on records read per event dataset (for test runs).
    pub limit: Option<u64>,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Areas in the reference set (and rows in the latest-events table).
    pub areas: usize,
    /// Collision events aggregated.
    pub collisions: usize,
    /// Crime events aggregated.
    pub crimes: usize,
    /// Records dropped across readers and resolver.
    pub dropped: usize,
    /// Rows in the joined quarterly trend table.
    pub trend_rows: usize,
}

/// Creates a progress reporter for a named pipeline step.
pub type ProgressFactory<'a> = dyn Fn(&str) -> Box<dyn ProgressCallback> + 'a;

/// Runs the whole pipeline and writes the output tables.
///
/// # Errors
///
/// Returns [`PipelineError`] on the first failure; nothing is written
/// unless every computation stage succeeds.
pub fn run(config: &RunConfig, progress: &ProgressFactory<'_>) -> Result<RunSummary, PipelineError> {
    let start = Instant::now();

    // Reference data and the index it feeds.
    let profiles = reference::read_area_profiles(&config.imd, &config.population)?;
    let units = profiles.iter().map(|p| p.unit()).collect();
    let index = AreaIndex::new(units)?;
    let all_codes: BTreeSet<String> = index.codes().map(str::to_string).collect();
    log::info!("Built area index with {} area(s)", index.len());

    // Event datasets.
    let collision_load = collisions::read_collisions(&config.collisions, config.limit)?;
    let crime_load = crime::read_crimes(&config.crimes, config.limit)?;
    let mut dropped = collision_load.skipped + crime_load.skipped;

    // Nearest-area assignment.
    let collision_resolution = resolve_events(
        collision_load.events,
        &index,
        progress("Resolving collisions").as_ref(),
    );
    let crime_resolution =
        resolve_events(crime_load.events, &index, progress("Resolving crime").as_ref());
    dropped += collision_resolution.dropped + crime_resolution.dropped;

    // Quarterly per-area trends, crime rows carrying collisions left-joined.
    let collision_quarters = quarterly_counts(&collision_resolution.events);
    let crime_quarters = quarterly_counts(&crime_resolution.events);
    let trends = join_trends(&crime_quarters, &collision_quarters);

    // Annual category trends over both datasets.
    let collision_events: Vec<_> = collision_resolution
        .events
        .iter()
        .map(|r| r.event.clone())
        .collect();
    let crime_events: Vec<_> = crime_resolution.events.iter().map(|r| r.event.clone()).collect();
    let mut categories = category_trends(
        &collision_events,
        collisions::CATEGORY_FIELDS,
        EventKind::Collisions,
    );
    categories.extend(category_trends(
        &crime_events,
        crime::CATEGORY_FIELDS,
        EventKind::Crime,
    ));

    // Latest-year summary with complete area coverage.
    let latest = fill_latest(&trends, &all_codes);
    debug_assert_eq!(latest.len(), all_codes.len());

    // Optional boundary conversion for the choropleths.
    let boundary_collection = config
        .boundaries
        .as_deref()
        .map(|path| boundary::read_boundaries(path).map(|b| boundary::to_feature_collection(&b)))
        .transpose()?;

    // All computation succeeded; now write outputs.
    std::fs::create_dir_all(&config.out_dir)?;
    export::write_csv(&config.out_dir.join(export::AREA_PROFILES_CSV), &profiles)?;
    export::write_csv(&config.out_dir.join(export::TRENDS_CSV), &trends)?;
    export::write_csv(&config.out_dir.join(export::CATEGORY_TIMESERIES_CSV), &categories)?;
    export::write_csv(&config.out_dir.join(export::LATEST_EVENTS_CSV), &latest)?;
    export::write_events_csv(
        &config.out_dir.join(export::COLLISIONS_ALL_CSV),
        &collision_resolution.events,
        collisions::CATEGORY_FIELDS,
    )?;
    export::write_events_csv(
        &config.out_dir.join(export::CRIME_ALL_CSV),
        &crime_resolution.events,
        crime::CATEGORY_FIELDS,
    )?;
    if let Some(collection) = &boundary_collection {
        export::write_geojson(&config.out_dir.join(export::BOUNDARIES_GEOJSON), collection)?;
    }

    let summary = RunSummary {
        areas: all_codes.len(),
        collisions: collision_resolution.events.len(),
        crimes: crime_resolution.events.len(),
        dropped,
        trend_rows: trends.len(),
    };

    log::info!(
        "Pipeline complete in {:.1?}: {} area(s), {} collision(s), {} crime(s), {} trend row(s), {} record(s) dropped",
        start.elapsed(),
        summary.areas,
        summary.collisions,
        summary.crimes,
        summary.trend_rows,
        summary.dropped,
    );

    Ok(summary)
}

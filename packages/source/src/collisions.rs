//! Reader for the road collision dataset.
//!
//! Collisions are aggregated under their collision `date` and carry a
//! numeric casualty count plus the categorical fields the annual trend
//! report groups on.

use std::path::Path;

use borough_trends_models::Event;

use crate::parsing::{field_str, field_string, parse_event_date, parse_lon_lat};
use crate::{DatasetLoad, SourceError, read_record_array, require_columns};

/// Categorical collision fields summarised per year by the trend report.
pub const CATEGORY_FIELDS: &[&str] = &[
    "number_of_casualties",
    "number_of_vehicles",
    "casualty_sex",
    "casualty_class",
    "casualty_age_band",
    "casualty_severity",
    "day",
    "road_type",
    "speed_limit",
    "junction_detail",
    "junction_control",
    "road_class_1",
    "weather",
    "road_surface",
];

const DATASET: &str = "road collisions";
const REQUIRED: &[&str] = &["longitude", "latitude", "date", "number_of_casualties"];

/// Reads the collision JSON export into events, dropping and counting
/// records with unusable coordinates or dates.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed, or if the
/// dataset is missing a required column.
pub fn read_collisions(path: &Path, limit: Option<u64>) -> Result<DatasetLoad, SourceError> {
    let records = read_record_array(path)?;
    require_columns(&records, DATASET, REQUIRED)?;

    let take = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
    let mut events = Vec::new();
    let mut skipped = 0;

    for record in records.iter().take(take) {
        match collision_event(record) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    log::info!(
        "Read {} collision record(s) from {} ({skipped} dropped)",
        events.len(),
        path.display()
    );
    Ok(DatasetLoad { events, skipped })
}

fn collision_event(record: &serde_json::Value) -> Option<Event> {
    let (longitude, latitude) =
        parse_lon_lat(field_str(record, "longitude"), field_str(record, "latitude"))?;
    let occurred = parse_event_date(field_str(record, "date")?)?;
    let casualties = field_string(record, "number_of_casualties")
        .and_then(|s| s.trim().parse::<f64>().ok());

    let attributes = CATEGORY_FIELDS
        .iter()
        .filter_map(|field| field_string(record, field).map(|value| ((*field).to_string(), value)))
        .collect();

    Some(Event {
        longitude,
        latitude,
        occurred,
        casualties,
        attributes,
    })
}

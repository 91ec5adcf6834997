//! CSV and GeoJSON writers for the pipeline outputs.
//!
//! Field names and declaration order of the serialized model types are the
//! schema contract with the reporting stage; the writers add nothing beyond
//! a header row.

use std::io::Write;
use std::path::Path;

use borough_trends_models::ResolvedEvent;
use geojson::GeoJson;
use serde::Serialize;

use crate::PipelineError;

/// Joined IMD and population reference table, one row per area.
pub const AREA_PROFILES_CSV: &str = "area_profiles.csv";
/// Quarterly per-area crime and collision trends.
pub const TRENDS_CSV: &str = "crime_collision_trends.csv";
/// Annual per-category counts for both event kinds.
pub const CATEGORY_TIMESERIES_CSV: &str = "category_timeseries.csv";
/// Latest-year totals, one row per known area.
pub const LATEST_EVENTS_CSV: &str = "latest_events.csv";
/// Every resolved collision event, one row each.
pub const COLLISIONS_ALL_CSV: &str = "road_collisions_all.csv";
/// Every resolved crime event, one row each.
pub const CRIME_ALL_CSV: &str = "crime_all.csv";
/// Area boundary polygons keyed by `area_code`.
pub const BOUNDARIES_GEOJSON: &str = "area_boundaries.geojson";

/// Writes rows to a CSV file with a header row derived from the row type.
///
/// # Errors
///
/// Returns [`PipelineError`] if the file cannot be created or a row fails
/// to serialize.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("Wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Writes resolved events to a CSV file, one row per event: area code,
/// coordinates, date, then the dataset's categorical fields in order.
/// Events without a value for a field get an empty cell.
///
/// The heatmap report reads these tables directly, so unlike the aggregate
/// exports the header cannot come from a model type; it depends on which
/// dataset is being written.
///
/// # Errors
///
/// Returns [`PipelineError`] if the file cannot be created or a row fails
/// to write.
pub fn write_events_csv(
    path: &Path,
    events: &[ResolvedEvent],
    category_fields: &[&str],
) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    write_events(&mut writer, events, category_fields)?;
    log::info!("Wrote {} event row(s) to {}", events.len(), path.display());
    Ok(())
}

fn write_events<W: Write>(
    writer: &mut csv::Writer<W>,
    events: &[ResolvedEvent],
    category_fields: &[&str],
) -> Result<(), PipelineError> {
    let mut header = vec!["area_code", "longitude", "latitude", "date"];
    header.extend_from_slice(category_fields);
    writer.write_record(&header)?;

    for resolved in events {
        let mut record = vec![
            resolved.area_code.clone(),
            resolved.event.longitude.to_string(),
            resolved.event.latitude.to_string(),
            resolved.event.occurred.to_string(),
        ];
        for field in category_fields {
            record.push(
                resolved
                    .event
                    .attributes
                    .get(*field)
                    .cloned()
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a GeoJSON document to a file.
///
/// # Errors
///
/// Returns [`PipelineError`] if serialization or the write fails.
pub fn write_geojson(path: &Path, geojson: &GeoJson) -> Result<(), PipelineError> {
    let raw = serde_json::to_string(geojson)?;
    std::fs::write(path, raw)?;
    log::info!("Wrote boundary GeoJSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use borough_trends_models::{Event, TrendRow};
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn absent_collision_fields_serialize_as_empty_not_zero() {
        let rows = vec![TrendRow {
            area_code: "A".to_string(),
            year: 2019,
            quarter: 1,
            crimes_count: 3,
            collisions_count: None,
            collisions_casualties: None,
        }];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row).unwrap();
        }
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "area_code,year,quarter,crimes_count,collisions_count,collisions_casualties"
        );
        assert_eq!(lines.next().unwrap(), "A,2019,1,3,,");
    }

    fn resolved(area: &str, attributes: &[(&str, &str)]) -> ResolvedEvent {
        ResolvedEvent {
            area_code: area.to_string(),
            event: Event {
                longitude: -0.14,
                latitude: 51.54,
                occurred: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
                casualties: None,
                attributes: attributes
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            },
        }
    }

    #[test]
    fn event_table_carries_the_dataset_fields_per_row() {
        let events = vec![
            resolved("A", &[("road_type", "Single carriageway"), ("weather", "Fine")]),
            resolved("B", &[("weather", "Raining")]),
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        write_events(&mut writer, &events, &["road_type", "weather"]).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + events.len());
        assert_eq!(lines[0], "area_code,longitude,latitude,date,road_type,weather");
        assert_eq!(lines[1], "A,-0.14,51.54,2019-06-01,Single carriageway,Fine");
        // Missing field values come out as empty cells, not dropped columns.
        assert_eq!(lines[2], "B,-0.14,51.54,2019-06-01,,Raining");
    }

    #[test]
    fn empty_event_table_still_gets_a_header() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_events(&mut writer, &[], &["category"]).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out.trim_end(), "area_code,longitude,latitude,date,category");
    }

    #[test]
    fn event_table_has_one_row_per_resolved_event() {
        let events: Vec<ResolvedEvent> = (0..7).map(|_| resolved("A", &[])).collect();
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_events(&mut writer, &events, &[]).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out.lines().count(), 8);
    }

    #[test]
    fn write_events_csv_creates_the_file() {
        let dir = std::env::temp_dir().join(format!("borough_trends_events_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(COLLISIONS_ALL_CSV);

        write_events_csv(&path, &[resolved("A", &[("weather", "Fine")])], &["weather"]).unwrap();
        let out = std::fs::read_to_string(&path).unwrap();
        assert!(out.starts_with("area_code,longitude,latitude,date,weather"));
        assert_eq!(out.lines().count(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

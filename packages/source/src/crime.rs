//! Reader for the crime outcomes dataset.
//!
//! Crime records are aggregated under their `outcome_date`, which is a
//! different field from the date the offence took place. The trend report
//! deliberately tracks outcomes, so the offence date is not read at all.

use std::path::Path;

use borough_trends_models::Event;

use crate::parsing::{field_str, field_string, parse_event_date, parse_lon_lat};
use crate::{DatasetLoad, SourceError, read_record_array, require_columns};

/// Categorical crime fields summarised per year by the trend report.
pub const CATEGORY_FIELDS: &[&str] = &["service", "location_subtype", "category"];

const DATASET: &str = "crime";
const REQUIRED: &[&str] = &["longitude", "latitude", "outcome_date", "category"];

/// Reads the crime JSON export into events, dropping and counting records
/// with unusable coordinates or outcome dates.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed, or if the
/// dataset is missing a required column.
pub fn read_crimes(path: &Path, limit: Option<u64>) -> Result<DatasetLoad, SourceError> {
    let records = read_record_array(path)?;
    require_columns(&records, DATASET, REQUIRED)?;

    let take = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
    let mut events = Vec::new();
    let mut skipped = 0;

    for record in records.iter().take(take) {
        match crime_event(record) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    log::info!(
        "Read {} crime record(s) from {} ({skipped} dropped)",
        events.len(),
        path.display()
    );
    Ok(DatasetLoad { events, skipped })
}

fn crime_event(record: &serde_json::Value) -> Option<Event> {
    let (longitude, latitude) =
        parse_lon_lat(field_str(record, "longitude"), field_str(record, "latitude"))?;
    let occurred = parse_event_date(field_str(record, "outcome_date")?)?;

    let attributes = CATEGORY_FIELDS
        .iter()
        .filter_map(|field| field_string(record, field).map(|value| ((*field).to_string(), value)))
        .collect();

    Some(Event {
        longitude,
        latitude,
        occurred,
        casualties: None,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn aggregates_under_outcome_date_not_offence_date() {
        let record = serde_json::json!({
            "longitude": "-0.13",
            "latitude": "51.55",
            "date": "2018-11-02T00:00:00",
            "outcome_date": "2019-01-20T00:00:00",
            "category": "Burglary",
            "service": "Police force",
        });
        let event = crime_event(&record).unwrap();
        assert_eq!(event.occurred, NaiveDate::from_ymd_opt(2019, 1, 20).unwrap());
        assert_eq!(event.casualties, None);
        assert_eq!(event.attributes["category"], "Burglary");
    }

    #[test]
    fn drops_record_without_outcome_date() {
        let record = serde_json::json!({
            "longitude": "-0.13",
            "latitude": "51.55",
            "category": "Burglary",
        });
        assert!(crime_event(&record).is_none());
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model types for the borough trends pipeline.
//!
//! These types form the schema contract between the pipeline stages and the
//! downstream reporting stage: the CSV exports serialize them field-by-field
//! in declaration order, with field names as the header row.

use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The kind of civic event a record describes.
///
/// Serialized lowercase to match the `event_type` column consumed by the
/// reporting stage (`collisions`, `crime`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    /// Road traffic collisions.
    Collisions,
    /// Crime incidents, dated by their outcome.
    Crime,
}

/// A small statistical area's code and representative point.
///
/// The representative point is the longitude/latitude the source publishes
/// for the area (an interior point, not a true centroid). Immutable once
/// loaded; codes are unique within an [`AreaIndex`].
///
/// [`AreaIndex`]: https://docs.rs/borough_trends_geography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaUnit {
    /// Area code (e.g. an LSOA 2011 code like "E01000907").
    pub code: String,
    /// Representative point longitude, WGS84 degrees.
    pub longitude: f64,
    /// Representative point latitude, WGS84 degrees.
    pub latitude: f64,
}

/// One row of the joined IMD + population reference table.
///
/// The inner join of the two reference datasets is what restricts the
/// pipeline to the target local authority's areas. Kept flat so the CSV
/// export can derive its header row from the field names directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaProfile {
    /// Area code.
    pub code: String,
    /// Representative point longitude, WGS84 degrees.
    pub longitude: f64,
    /// Representative point latitude, WGS84 degrees.
    pub latitude: f64,
    /// All-ages mid-year population estimate.
    pub population: u64,
    /// Overall IMD score.
    pub index_of_multiple_deprivation_score: f64,
    /// Income deprivation domain score.
    pub income_score: f64,
    /// Employment deprivation domain score.
    pub employment_score: f64,
    /// Education, skills and training domain score.
    pub education_skills_and_training_score: f64,
    /// Health deprivation and disability domain score.
    pub health_deprivation_and_disability_score: f64,
    /// Crime domain score.
    pub crime_score: f64,
    /// Barriers to housing and services domain score.
    pub barriers_to_housing_and_services_score: f64,
    /// Living environment domain score.
    pub living_environment_score: f64,
}

impl AreaProfile {
    /// The profile's area code and representative point, as consumed by
    /// the area index.
    #[must_use]
    pub fn unit(&self) -> AreaUnit {
        AreaUnit {
            code: self.code.clone(),
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

/// A single collision or crime record with a point location.
///
/// `occurred` is the collision date for collisions and the *outcome* date
/// for crime records. The two source fields are semantically different and
/// must not be conflated; each reader picks the right one.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event longitude, WGS84 degrees.
    pub longitude: f64,
    /// Event latitude, WGS84 degrees.
    pub latitude: f64,
    /// The date the event is aggregated under.
    pub occurred: NaiveDate,
    /// Number of casualties (collisions only).
    pub casualties: Option<f64>,
    /// Raw categorical field values, keyed by source field name.
    pub attributes: BTreeMap<String, String>,
}

/// An [`Event`] annotated with its nearest area's code by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEvent {
    /// Code of the nearest area in the index the event was resolved against.
    pub area_code: String,
    /// The underlying event.
    pub event: Event,
}

/// Quarterly aggregate for one event kind in one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterCount {
    /// Area code.
    pub area_code: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar quarter, 1-4.
    pub quarter: u8,
    /// Number of events in the group.
    pub count: u64,
    /// Sum of casualties over the group (zero for crime).
    pub casualties: f64,
}

/// A joined quarterly trend row: crime counts with collision figures
/// left-joined on.
///
/// `None` in the collision fields means "no collision record for this
/// (area, year, quarter)", which is distinct from an observed zero. The
/// CSV export writes them as empty fields, never `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    /// Area code.
    pub area_code: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar quarter, 1-4.
    pub quarter: u8,
    /// Crime incidents in the group, dated by outcome.
    pub crimes_count: u64,
    /// Collisions in the group, if any collision row matched the key.
    pub collisions_count: Option<u64>,
    /// Collision casualties in the group, if any collision row matched.
    pub collisions_casualties: Option<f64>,
}

/// Annual count of one categorical field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrendRow {
    /// Source field name (e.g. `road_type`).
    pub category: String,
    /// Upper-cased field value (e.g. `SINGLE CARRIAGEWAY`).
    pub subcategory: String,
    /// Calendar year.
    pub year: i32,
    /// Number of events with this value in this year.
    pub count: u64,
    /// Which dataset the field came from.
    pub event_type: EventKind,
}

/// Latest-year totals for one area, zero-filled by the gap-filler so that
/// every known area appears exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSummary {
    /// Area code.
    pub area_code: String,
    /// Crime incidents in the latest year.
    pub crimes_count: u64,
    /// Collisions in the latest year.
    pub collisions_count: u64,
    /// Collision casualties in the latest year.
    pub collisions_casualties: f64,
}

/// Returns the calendar quarter (1-4) a date falls in.
#[must_use]
pub fn quarter_of(date: NaiveDate) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (1 + (date.month() - 1) / 3) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_boundaries() {
        let cases = [(1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (9, 3), (10, 4), (12, 4)];
        for (month, quarter) in cases {
            let date = NaiveDate::from_ymd_opt(2019, month, 15).unwrap();
            assert_eq!(quarter_of(date), quarter, "month {month}");
        }
    }

    #[test]
    fn event_kind_display_is_lowercase() {
        assert_eq!(EventKind::Collisions.to_string(), "collisions");
        assert_eq!(EventKind::Crime.to_string(), "crime");
    }
}

//! Annual counts of categorical field values.

use std::collections::BTreeMap;

use borough_trends_models::{CategoryTrendRow, Event, EventKind};
use chrono::Datelike as _;

/// For each named field, groups events by (upper-cased value, year) and
/// counts them. The field name becomes `category`, the value `subcategory`.
///
/// Upper-casing is mandatory: the source data mixes casing for the same
/// value, and the trend lines would otherwise split. Events without a
/// value for a field are skipped for that field; a missing value is not a
/// category.
#[must_use]
pub fn category_trends(
    events: &[Event],
    fields: &[&str],
    kind: EventKind,
) -> Vec<CategoryTrendRow> {
    let mut rows = Vec::new();

    for field in fields {
        let mut groups: BTreeMap<(String, i32), u64> = BTreeMap::new();

        for event in events {
            let Some(value) = event.attributes.get(*field) else {
                continue;
            };
            *groups
                .entry((value.to_uppercase(), event.occurred.year()))
                .or_default() += 1;
        }

        for ((subcategory, year), count) in groups {
            rows.push(CategoryTrendRow {
                category: (*field).to_string(),
                subcategory,
                year,
                count,
                event_type: kind,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn event(year: i32, attributes: &[(&str, &str)]) -> Event {
        Event {
            longitude: -0.14,
            latitude: 51.54,
            occurred: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            casualties: None,
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn merges_inconsistent_casing() {
        let events = vec![
            event(2019, &[("road_type", "Single carriageway")]),
            event(2019, &[("road_type", "SINGLE CARRIAGEWAY")]),
            event(2019, &[("road_type", "Roundabout")]),
        ];
        let rows = category_trends(&events, &["road_type"], EventKind::Collisions);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subcategory, "ROUNDABOUT");
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[1].subcategory, "SINGLE CARRIAGEWAY");
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn field_name_becomes_category_and_year_splits_groups() {
        let events = vec![
            event(2018, &[("weather", "Fine")]),
            event(2019, &[("weather", "Fine")]),
        ];
        let rows = category_trends(&events, &["weather"], EventKind::Collisions);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.category == "weather"));
        assert!(rows.iter().all(|r| r.event_type == EventKind::Collisions));
        assert_eq!(rows[0].year, 2018);
        assert_eq!(rows[1].year, 2019);
    }

    #[test]
    fn events_without_the_field_are_skipped() {
        let events = vec![
            event(2019, &[("service", "Police force")]),
            event(2019, &[]),
        ];
        let rows = category_trends(&events, &["service"], EventKind::Crime);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 1);
    }
}

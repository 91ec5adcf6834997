//! Latest-year per-area totals with complete area coverage.

use std::collections::{BTreeMap, BTreeSet};

use borough_trends_models::{LatestSummary, TrendRow};

/// Sums the latest year's trend rows per area and zero-fills every known
/// area absent from the data.
///
/// "Latest" is the maximum year observed across all rows. The output holds
/// exactly one row per code in `all_codes`, sorted by code. A choropleth
/// must render every area, including those with no events at all.
#[must_use]
pub fn fill_latest(rows: &[TrendRow], all_codes: &BTreeSet<String>) -> Vec<LatestSummary> {
    let latest_year = rows.iter().map(|row| row.year).max();

    let mut sums: BTreeMap<&str, LatestSummary> = all_codes
        .iter()
        .map(|code| {
            (
                code.as_str(),
                LatestSummary {
                    area_code: code.clone(),
                    crimes_count: 0,
                    collisions_count: 0,
                    collisions_casualties: 0.0,
                },
            )
        })
        .collect();

    if let Some(year) = latest_year {
        for row in rows.iter().filter(|row| row.year == year) {
            let Some(summary) = sums.get_mut(row.area_code.as_str()) else {
                continue;
            };
            summary.crimes_count += row.crimes_count;
            summary.collisions_count += row.collisions_count.unwrap_or(0);
            summary.collisions_casualties += row.collisions_casualties.unwrap_or(0.0);
        }
    }

    sums.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| (*c).to_string()).collect()
    }

    fn row(area: &str, year: i32, quarter: u8, crimes: u64) -> TrendRow {
        TrendRow {
            area_code: area.to_string(),
            year,
            quarter,
            crimes_count: crimes,
            collisions_count: Some(1),
            collisions_casualties: Some(2.0),
        }
    }

    #[test]
    fn zero_fills_areas_without_events() {
        let rows = vec![row("A", 2019, 1, 5)];
        let summaries = fill_latest(&rows, &codes(&["A", "B", "C"]));

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].area_code, "A");
        assert_eq!(summaries[0].crimes_count, 5);
        for summary in &summaries[1..] {
            assert_eq!(summary.crimes_count, 0);
            assert_eq!(summary.collisions_count, 0);
            assert!(summary.collisions_casualties.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn output_length_always_equals_the_reference_set() {
        let all = codes(&["A", "B", "C", "D", "E"]);
        assert_eq!(fill_latest(&[], &all).len(), all.len());
        let rows = vec![row("A", 2019, 1, 1), row("B", 2019, 2, 1)];
        assert_eq!(fill_latest(&rows, &all).len(), all.len());
    }

    #[test]
    fn only_the_latest_year_is_summed() {
        let rows = vec![
            row("A", 2018, 1, 100),
            row("A", 2019, 1, 3),
            row("A", 2019, 3, 4),
        ];
        let summaries = fill_latest(&rows, &codes(&["A"]));
        assert_eq!(summaries[0].crimes_count, 7);
        assert_eq!(summaries[0].collisions_count, 2);
        assert!((summaries[0].collisions_casualties - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn absent_collision_fields_contribute_nothing() {
        let rows = vec![TrendRow {
            area_code: "A".to_string(),
            year: 2019,
            quarter: 1,
            crimes_count: 2,
            collisions_count: None,
            collisions_casualties: None,
        }];
        let summaries = fill_latest(&rows, &codes(&["A"]));
        assert_eq!(summaries[0].collisions_count, 0);
        assert!(summaries[0].collisions_casualties.abs() < f64::EPSILON);
    }
}

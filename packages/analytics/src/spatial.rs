//! Quarterly per-area aggregation and the crime/collision trend join.

use std::collections::BTreeMap;

use borough_trends_models::{QuarterCount, ResolvedEvent, TrendRow, quarter_of};
use chrono::Datelike as _;

/// Groups resolved events by (area code, year, quarter).
///
/// `count` is the group size; `casualties` sums the events' casualty
/// attribute (zero for kinds that carry none). Duplicate keys are summed,
/// never overwritten, and the output holds at most one row per key, sorted
/// by key.
#[must_use]
pub fn quarterly_counts(events: &[ResolvedEvent]) -> Vec<QuarterCount> {
    let mut groups: BTreeMap<(&str, i32, u8), (u64, f64)> = BTreeMap::new();

    for resolved in events {
        let date = resolved.event.occurred;
        let key = (resolved.area_code.as_str(), date.year(), quarter_of(date));
        let entry = groups.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += resolved.event.casualties.unwrap_or(0.0);
    }

    groups
        .into_iter()
        .map(|((area_code, year, quarter), (count, casualties))| QuarterCount {
            area_code: area_code.to_string(),
            year,
            quarter,
            count,
            casualties,
        })
        .collect()
}

/// Left outer join of crime quarterly counts with collision quarterly
/// counts on (area code, year, quarter).
///
/// Unmatched collision fields stay `None`: absence means "no collision
/// record for this key", which is distinct from an observed zero and must
/// survive into the CSV as an empty field.
#[must_use]
pub fn join_trends(crime: &[QuarterCount], collisions: &[QuarterCount]) -> Vec<TrendRow> {
    let collision_map: BTreeMap<(&str, i32, u8), &QuarterCount> = collisions
        .iter()
        .map(|row| ((row.area_code.as_str(), row.year, row.quarter), row))
        .collect();

    crime
        .iter()
        .map(|row| {
            let matched = collision_map.get(&(row.area_code.as_str(), row.year, row.quarter));
            TrendRow {
                area_code: row.area_code.clone(),
                year: row.year,
                quarter: row.quarter,
                crimes_count: row.count,
                collisions_count: matched.map(|c| c.count),
                collisions_casualties: matched.map(|c| c.casualties),
            }
        })
        .collect()
}

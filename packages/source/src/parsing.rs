//! Shared parsing utilities for open data records.
//!
//! Common date, coordinate, and field extraction functions used across the
//! dataset readers.

use chrono::{NaiveDate, NaiveDateTime};

/// Parses an event date from a Socrata-style value: ISO 8601 with optional
/// time and fractional seconds, or a bare date.
#[must_use]
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parses lon/lat from optional string fields. Returns `None` if either is
/// missing, unparseable, zero, or non-finite.
#[must_use]
pub fn parse_lon_lat(lon: Option<&str>, lat: Option<&str>) -> Option<(f64, f64)> {
    let longitude = lon?.trim().parse::<f64>().ok()?;
    let latitude = lat?.trim().parse::<f64>().ok()?;
    if longitude == 0.0 || latitude == 0.0 || !longitude.is_finite() || !latitude.is_finite() {
        return None;
    }
    Some((longitude, latitude))
}

/// Returns a record's field as a string slice, if present and a string.
#[must_use]
pub fn field_str<'a>(record: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    record.get(name).and_then(serde_json::Value::as_str)
}

/// Returns a record's field as an owned string, stringifying bare numbers
/// (some portal exports serialize numeric columns unquoted).
#[must_use]
pub fn field_string(record: &serde_json::Value, name: &str) -> Option<String> {
    match record.get(name)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_with_fractional_time() {
        let date = parse_event_date("2019-03-15T14:30:00.000").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 3, 15).unwrap());
    }

    #[test]
    fn parses_date_without_time() {
        let date = parse_event_date("2019-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 3, 15).unwrap());
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(parse_event_date("not-a-date").is_none());
    }

    #[test]
    fn parses_lon_lat_strings() {
        let (lon, lat) = parse_lon_lat(Some("-0.1406"), Some("51.5390")).unwrap();
        assert!((lon - -0.1406).abs() < f64::EPSILON);
        assert!((lat - 51.5390).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_coordinates() {
        assert!(parse_lon_lat(Some("0.0"), Some("51.5390")).is_none());
    }

    #[test]
    fn rejects_missing_coordinates() {
        assert!(parse_lon_lat(None, Some("51.5390")).is_none());
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert!(parse_lon_lat(Some("east-ish"), Some("51.5390")).is_none());
    }

    #[test]
    fn field_string_stringifies_numbers() {
        let record = serde_json::json!({"speed_limit": 30, "day": "MONDAY"});
        assert_eq!(field_string(&record, "speed_limit").unwrap(), "30");
        assert_eq!(field_string(&record, "day").unwrap(), "MONDAY");
        assert!(field_string(&record, "weather").is_none());
    }
}

//! In-memory index of small areas keyed by representative point.

use std::collections::BTreeSet;

use borough_trends_models::AreaUnit;

use crate::GeoError;

/// An immutable collection of small areas supporting nearest-point lookup.
///
/// Distance is squared Euclidean in longitude/latitude degree-space with no
/// projection correction, an accepted approximation for areas small
/// relative to earth curvature.
pub struct AreaIndex {
    areas: Vec<AreaUnit>,
}

impl AreaIndex {
    /// Builds an index from the reference areas, validating eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::EmptyAreaIndex`] for an empty input and
    /// [`GeoError::DuplicateAreaCode`] if two areas share a code.
    pub fn new(areas: Vec<AreaUnit>) -> Result<Self, GeoError> {
        if areas.is_empty() {
            return Err(GeoError::EmptyAreaIndex);
        }

        let mut seen = BTreeSet::new();
        for area in &areas {
            if !seen.insert(area.code.as_str()) {
                return Err(GeoError::DuplicateAreaCode {
                    code: area.code.clone(),
                });
            }
        }

        Ok(Self { areas })
    }

    /// Returns the code of the area whose representative point is closest
    /// to the given point. Ties break to the first occurrence in input
    /// order, keeping assignment stable and deterministic.
    #[must_use]
    pub fn nearest(&self, longitude: f64, latitude: f64) -> &str {
        let mut best = &self.areas[0];
        let mut best_dist = squared_distance(best, longitude, latitude);

        for area in &self.areas[1..] {
            let dist = squared_distance(area, longitude, latitude);
            if dist < best_dist {
                best = area;
                best_dist = dist;
            }
        }

        &best.code
    }

    /// Iterates area codes in input order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.areas.iter().map(|a| a.code.as_str())
    }

    /// Number of areas in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the index holds no areas. Always `false` for a built index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

fn squared_distance(area: &AreaUnit, longitude: f64, latitude: f64) -> f64 {
    let dx = area.longitude - longitude;
    let dy = area.latitude - latitude;
    dx.mul_add(dx, dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(code: &str, longitude: f64, latitude: f64) -> AreaUnit {
        AreaUnit {
            code: code.to_string(),
            longitude,
            latitude,
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            AreaIndex::new(vec![]),
            Err(GeoError::EmptyAreaIndex)
        ));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let result = AreaIndex::new(vec![area("A", 0.0, 0.0), area("A", 1.0, 1.0)]);
        match result {
            Err(GeoError::DuplicateAreaCode { code }) => assert_eq!(code, "A"),
            other => panic!("expected duplicate code error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn nearest_picks_the_closer_area() {
        let index = AreaIndex::new(vec![area("A", 0.0, 0.0), area("B", 10.0, 10.0)]).unwrap();
        assert_eq!(index.nearest(1.0, 1.0), "A");
        assert_eq!(index.nearest(9.0, 9.0), "B");
    }

    #[test]
    fn nearest_is_self_consistent() {
        let areas = vec![
            area("A", -0.14, 51.54),
            area("B", -0.16, 51.55),
            area("C", -0.12, 51.53),
            area("D", -0.19, 51.56),
        ];
        let index = AreaIndex::new(areas.clone()).unwrap();
        for unit in &areas {
            assert_eq!(index.nearest(unit.longitude, unit.latitude), unit.code);
        }
    }

    #[test]
    fn ties_break_to_first_occurrence() {
        let index = AreaIndex::new(vec![area("A", 1.0, 0.0), area("B", -1.0, 0.0)]).unwrap();
        // (0, 0) is equidistant from both representative points.
        assert_eq!(index.nearest(0.0, 0.0), "A");
    }
}

//! Area boundary polygons for the choropleth reports.
//!
//! The open data portal publishes boundaries as an array of records with an
//! area code and a GeoJSON-like geometry field. The reporting stage joins
//! choropleth values onto these polygons by `area_code`, so the conversion
//! here fixes the code-to-polygon mapping the reports depend on.

use std::path::Path;

use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::GeoError;

const CODE_FIELD: &str = "lsoa_2011_code";
const GEOMETRY_FIELD: &str = "the_geom";
const DATASET: &str = "area boundaries";

/// One area's boundary polygon.
#[derive(Debug, Clone)]
pub struct AreaBoundary {
    /// Area code the polygon belongs to.
    pub code: String,
    /// Boundary geometry. Single polygons are wrapped into a
    /// one-element [`MultiPolygon`].
    pub polygon: MultiPolygon<f64>,
}

/// Reads the boundary export into per-area polygons.
///
/// Records with a missing code or unparseable geometry are skipped with a
/// warning; the reports simply render no shape for them.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or parsed, or if no
/// record yields a usable polygon.
pub fn read_boundaries(path: &Path) -> Result<Vec<AreaBoundary>, GeoError> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

    let mut boundaries = Vec::new();
    for record in records {
        let Some(code) = record.get(CODE_FIELD).and_then(serde_json::Value::as_str) else {
            log::warn!("Boundary record without a {CODE_FIELD} field, skipping");
            continue;
        };

        let Some(polygon) = record
            .get(GEOMETRY_FIELD)
            .and_then(|geom| parse_multipolygon(geom.clone()))
        else {
            log::warn!("Failed to parse boundary geometry for {code}, skipping");
            continue;
        };

        boundaries.push(AreaBoundary {
            code: code.to_string(),
            polygon,
        });
    }

    if boundaries.is_empty() {
        return Err(GeoError::EmptyBoundaries {
            dataset: DATASET.to_string(),
        });
    }

    log::info!("Loaded {} boundary polygon(s)", boundaries.len());
    Ok(boundaries)
}

/// Builds a GeoJSON `FeatureCollection` with one feature per area, carrying
/// the code as an `area_code` property.
#[must_use]
pub fn to_feature_collection(boundaries: &[AreaBoundary]) -> GeoJson {
    let features = boundaries
        .iter()
        .map(|boundary| {
            let mut properties = geojson::JsonObject::new();
            properties.insert(
                "area_code".to_string(),
                serde_json::Value::String(boundary.code.clone()),
            );

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &boundary.polygon,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Parses a GeoJSON-like geometry value into a [`MultiPolygon`], accepting
/// both `Polygon` and `MultiPolygon` geometry types.
fn parse_multipolygon(geometry: serde_json::Value) -> Option<MultiPolygon<f64>> {
    let geometry: geojson::Geometry = serde_json::from_value(geometry).ok()?;
    let geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geometry {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

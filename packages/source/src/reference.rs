//! Reader for the area reference data: IMD deprivation indices joined with
//! mid-year population estimates.
//!
//! The IMD export carries one record per small area with a representative
//! point; the population table is national. The inner join keeps only areas
//! present in both, which is what restricts the pipeline to the target
//! local authority.

use std::collections::BTreeMap;
use std::path::Path;

use borough_trends_models::AreaProfile;

use crate::parsing::{field_str, field_string, parse_lon_lat};
use crate::{SourceError, read_record_array, require_columns};

const IMD_DATASET: &str = "imd";
const POPULATION_DATASET: &str = "population";
const IMD_REQUIRED: &[&str] = &["lower_super_output_area_code", "longitude", "latitude"];
const POPULATION_COLUMNS: &[&str] = &["lsoa_code", "all_ages"];

#[derive(Debug, serde::Deserialize)]
struct PopulationRecord {
    lsoa_code: String,
    all_ages: u64,
}

/// Reads the population CSV into a code -> all-ages count map.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or the expected
/// columns are absent.
pub fn read_populations(path: &Path) -> Result<BTreeMap<String, u64>, SourceError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in POPULATION_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(SourceError::MissingColumn {
                dataset: POPULATION_DATASET.to_string(),
                column: (*column).to_string(),
            });
        }
    }

    let mut populations = BTreeMap::new();
    for result in reader.deserialize::<PopulationRecord>() {
        let record = result?;
        populations.insert(record.lsoa_code.trim().to_string(), record.all_ages);
    }
    Ok(populations)
}

/// Reads the IMD export and inner-joins it with the population table,
/// producing one [`AreaProfile`] per area known to both datasets.
///
/// IMD records with unusable coordinates are dropped with a warning; an
/// empty join result fails the run.
///
/// # Errors
///
/// Returns [`SourceError`] if either file cannot be read, a required
/// column is absent, or the join produces no rows.
pub fn read_area_profiles(
    imd_path: &Path,
    population_path: &Path,
) -> Result<Vec<AreaProfile>, SourceError> {
    let populations = read_populations(population_path)?;
    if populations.is_empty() {
        return Err(SourceError::EmptyReference {
            dataset: POPULATION_DATASET.to_string(),
        });
    }

    let records = read_record_array(imd_path)?;
    require_columns(&records, IMD_DATASET, IMD_REQUIRED)?;

    let mut profiles = Vec::new();
    let mut dropped = 0;

    for record in &records {
        let Some(profile) = area_profile(record, &populations) else {
            dropped += 1;
            continue;
        };
        profiles.push(profile);
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} IMD record(s) without usable code/coordinates");
    }
    if profiles.is_empty() {
        return Err(SourceError::EmptyReference {
            dataset: IMD_DATASET.to_string(),
        });
    }

    log::info!(
        "Joined {} area profile(s) from {} IMD record(s) and {} population row(s)",
        profiles.len(),
        records.len(),
        populations.len()
    );
    Ok(profiles)
}

fn area_profile(
    record: &serde_json::Value,
    populations: &BTreeMap<String, u64>,
) -> Option<AreaProfile> {
    let code = field_str(record, "lower_super_output_area_code")?.trim().to_string();
    let (longitude, latitude) =
        parse_lon_lat(field_str(record, "longitude"), field_str(record, "latitude"))?;
    let population = *populations.get(&code)?;

    Some(AreaProfile {
        code,
        longitude,
        latitude,
        population,
        index_of_multiple_deprivation_score: score(record, "index_of_multiple_deprivation_score"),
        income_score: score(record, "income_score"),
        employment_score: score(record, "employment_score"),
        education_skills_and_training_score: score(record, "education_skills_and_training_score"),
        health_deprivation_and_disability_score: score(
            record,
            "health_deprivation_and_disability_score",
        ),
        crime_score: score(record, "crime_score"),
        barriers_to_housing_and_services_score: score(
            record,
            "barriers_to_housing_and_services_score",
        ),
        living_environment_score: score(record, "living_environment_score"),
    })
}

fn score(record: &serde_json::Value, name: &str) -> f64 {
    field_string(record, name)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imd_record(code: &str) -> serde_json::Value {
        serde_json::json!({
            "lower_super_output_area_code": code,
            "longitude": "-0.14",
            "latitude": "51.54",
            "index_of_multiple_deprivation_score": "23.4",
            "crime_score": "0.9",
        })
    }

    #[test]
    fn joins_only_areas_present_in_both_datasets() {
        let populations = BTreeMap::from([("E01000001".to_string(), 1500)]);
        assert!(area_profile(&imd_record("E01000001"), &populations).is_some());
        assert!(area_profile(&imd_record("E01009999"), &populations).is_none());
    }

    #[test]
    fn carries_scores_and_population_through_the_join() {
        let populations = BTreeMap::from([("E01000001".to_string(), 1500)]);
        let profile = area_profile(&imd_record("E01000001"), &populations).unwrap();
        assert_eq!(profile.population, 1500);
        assert!((profile.index_of_multiple_deprivation_score - 23.4).abs() < f64::EPSILON);
        assert!((profile.crime_score - 0.9).abs() < f64::EPSILON);
        assert!(profile.income_score.abs() < f64::EPSILON);
    }
}

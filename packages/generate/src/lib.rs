#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Synthetic non-accident generation.
//!
//! Fabricates a configurable multiple of labeled "non-accident" rows by
//! sampling district, time-of-day, and weather from the empirical
//! distributions of the real accident population, and drawing participant
//! counts and vehicle presence flags from fixed ranges and coin flips. The
//! output balances the binary classification dataset; it makes no claim of
//! statistical soundness beyond reproducing the upstream heuristic.
//!
//! The random source is injected (`R: Rng`) so callers can seed runs and
//! tests can assert distributional properties instead of exact values.

pub mod empirical;

use std::collections::BTreeMap;

use accidentalidad_classify::temporal;
use accidentalidad_models::{
    AccidentAggregate, AccidentLabel, DistrictTier, SeverityLabel, TimeBucket,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::empirical::EmpiricalDist;

/// Errors raised by the generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The generator needs a real population to estimate distributions
    /// from.
    #[error("cannot generate non-accidents from an empty accident population")]
    EmptyPopulation,
}

/// Generator settings: the replication factor and the vehicle presence
/// probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Synthetic rows generated per real accident.
    pub factor: usize,
    /// Probability a synthetic row includes a two-wheeled vehicle.
    pub two_wheeler_probability: f64,
    /// Probability a synthetic row includes a heavy vehicle.
    pub heavy_probability: f64,
    /// Probability a synthetic row includes a passenger car.
    pub car_probability: f64,
    /// Probability a synthetic row includes another vehicle category.
    pub other_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            factor: 3,
            two_wheeler_probability: 0.3,
            heavy_probability: 0.1,
            car_probability: 0.8,
            other_probability: 0.05,
        }
    }
}

/// Generates `population.len() * config.factor` synthetic non-accident
/// rows.
///
/// Each row draws district, time-of-day bucket, and weather from the real
/// population's empirical distributions, a timestamp uniform over the
/// observed date range with the hour placed inside the drawn bucket, and
/// participant counts from the fixed traffic-without-incident ranges. The
/// district tier is looked up from `tiers` like any other district
/// reference. Severity is fixed at zero with the `Ninguno` sentinel label.
///
/// # Errors
///
/// Returns [`GenerateError::EmptyPopulation`] when `population` is empty —
/// there is nothing to estimate distributions from.
pub fn generate_non_accidents<R: Rng + ?Sized>(
    population: &[AccidentAggregate],
    config: &GeneratorConfig,
    tiers: &BTreeMap<String, DistrictTier>,
    rng: &mut R,
) -> Result<Vec<AccidentAggregate>, GenerateError> {
    let districts =
        EmpiricalDist::from_observations(population.iter().map(|a| a.district.clone()))
            .ok_or(GenerateError::EmptyPopulation)?;
    let weather = EmpiricalDist::from_observations(population.iter().map(|a| a.weather.clone()))
        .ok_or(GenerateError::EmptyPopulation)?;
    // Time buckets fall back to a uniform draw when absent from the input.
    let buckets = EmpiricalDist::from_observations(population.iter().map(|a| a.time_bucket));

    let first_date = population
        .iter()
        .map(|a| a.occurred_at.date())
        .min()
        .ok_or(GenerateError::EmptyPopulation)?;
    let last_date = population
        .iter()
        .map(|a| a.occurred_at.date())
        .max()
        .ok_or(GenerateError::EmptyPopulation)?;
    let range_days = (last_date - first_date).num_days();

    let count = population.len() * config.factor;
    log::info!(
        "generating {count} non-accident rows (factor {})",
        config.factor
    );

    let mut rows = Vec::with_capacity(count);
    for i in 0..count {
        let district = districts.sample(rng).clone();
        let bucket = match &buckets {
            Some(dist) => *dist.sample(rng),
            None => TimeBucket::all()[rng.gen_range(0..TimeBucket::all().len())],
        };
        let occurred_at = sample_timestamp(rng, first_date, range_days, bucket);

        let drivers = rng.gen_range(1..4);
        let passengers = rng.gen_range(0..3);
        let pedestrians = rng.gen_range(0..2);
        let two_wheelers = u32::from(rng.gen_bool(config.two_wheeler_probability));
        let heavy_vehicles = u32::from(rng.gen_bool(config.heavy_probability));
        let cars = u32::from(rng.gen_bool(config.car_probability));
        let other_vehicles = u32::from(rng.gen_bool(config.other_probability));

        let (day_of_week, _) = temporal::enrich(occurred_at);
        let district_tier = tiers.get(&district).copied();

        let mut row = AccidentAggregate {
            id: format!("NA{i:06}"),
            occurred_at,
            district,
            district_tier,
            accident_type: None,
            weather: weather.sample(rng).clone(),
            day_of_week: day_of_week.to_string(),
            time_bucket: bucket,
            drivers,
            passengers,
            pedestrians,
            two_wheelers,
            heavy_vehicles,
            cars,
            other_vehicles,
            total_involved: 0,
            has_vulnerable: pedestrians > 0,
            vehicle_diversity: 0,
            severity_index: 0.0,
            severity: SeverityLabel::Ninguno,
            label: AccidentLabel::NonAccident,
        };
        row.total_involved = row.derived_total_involved();
        row.vehicle_diversity = row.derived_vehicle_diversity();
        rows.push(row);
    }

    Ok(rows)
}

/// Draws a timestamp uniform over the observed date range, with the hour
/// placed inside the drawn time bucket and the minute uniform in [0, 60).
fn sample_timestamp<R: Rng + ?Sized>(
    rng: &mut R,
    first_date: NaiveDate,
    range_days: i64,
    bucket: TimeBucket,
) -> chrono::NaiveDateTime {
    let offset = if range_days > 0 {
        rng.gen_range(0..range_days)
    } else {
        0
    };
    let hour = match bucket {
        TimeBucket::Manana => rng.gen_range(6..12),
        TimeBucket::Tarde => rng.gen_range(12..18),
        TimeBucket::Noche => rng.gen_range(18..22),
        // Madrugada spans the wrap-around: either late evening or early
        // morning, with equal probability.
        TimeBucket::Madrugada => {
            if rng.gen_bool(0.5) {
                rng.gen_range(22..24)
            } else {
                rng.gen_range(0..6)
            }
        }
    };
    let minute = rng.gen_range(0..60);
    (first_date + Duration::days(offset))
        .and_hms_opt(hour, minute, 0)
        .expect("hour < 24 and minute < 60 are always a valid clock time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use accidentalidad_models::SeverityBand;
    use chrono::{NaiveDateTime, Timelike as _};
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn accident(id: &str, district: &str, occurred_at: NaiveDateTime) -> AccidentAggregate {
        AccidentAggregate {
            id: id.to_string(),
            occurred_at,
            district: district.to_string(),
            district_tier: None,
            accident_type: Some("Alcance".to_string()),
            weather: "Despejado".to_string(),
            day_of_week: "Lunes".to_string(),
            time_bucket: TimeBucket::from_hour(occurred_at.hour()),
            drivers: 2,
            passengers: 0,
            pedestrians: 0,
            two_wheelers: 0,
            heavy_vehicles: 0,
            cars: 2,
            other_vehicles: 0,
            total_involved: 2,
            has_vulnerable: false,
            vehicle_diversity: 1,
            severity_index: 2.1,
            severity: SeverityLabel::Band(SeverityBand::Medio),
            label: AccidentLabel::Accident,
        }
    }

    fn population() -> Vec<AccidentAggregate> {
        // 80% Centro, 20% Retiro over a two-year span.
        let mut rows: Vec<AccidentAggregate> = (0..80)
            .map(|i| accident(&format!("C{i}"), "Centro", ts(2021, 1, 1, 9)))
            .collect();
        rows.extend((0..20).map(|i| accident(&format!("R{i}"), "Retiro", ts(2022, 12, 31, 20))));
        rows
    }

    #[test]
    fn empty_population_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_non_accidents(
                &[],
                &GeneratorConfig::default(),
                &BTreeMap::new(),
                &mut rng
            ),
            Err(GenerateError::EmptyPopulation)
        ));
    }

    #[test]
    fn output_length_is_population_times_factor() {
        let mut rng = StdRng::seed_from_u64(2);
        let rows = generate_non_accidents(
            &population(),
            &GeneratorConfig::default(),
            &BTreeMap::new(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(rows.len(), 300);
    }

    #[test]
    fn every_row_carries_the_negative_markers() {
        let mut rng = StdRng::seed_from_u64(3);
        let rows = generate_non_accidents(
            &population(),
            &GeneratorConfig::default(),
            &BTreeMap::new(),
            &mut rng,
        )
        .unwrap();
        for row in &rows {
            assert!(row.severity_index.abs() < f64::EPSILON);
            assert_eq!(row.severity, SeverityLabel::Ninguno);
            assert_eq!(row.label, AccidentLabel::NonAccident);
            assert_eq!(row.accident_type, None);
        }
    }

    #[test]
    fn identifiers_are_sequential_and_zero_padded() {
        let mut rng = StdRng::seed_from_u64(4);
        let rows = generate_non_accidents(
            &population()[..2],
            &GeneratorConfig::default(),
            &BTreeMap::new(),
            &mut rng,
        )
        .unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            ["NA000000", "NA000001", "NA000002", "NA000003", "NA000004", "NA000005"]
        );
    }

    #[test]
    fn district_distribution_converges_to_empirical() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = GeneratorConfig {
            factor: 100,
            ..GeneratorConfig::default()
        };
        let rows =
            generate_non_accidents(&population(), &config, &BTreeMap::new(), &mut rng).unwrap();
        let centro = rows.iter().filter(|r| r.district == "Centro").count();
        let frequency = centro as f64 / rows.len() as f64;
        assert!(
            (frequency - 0.8).abs() < 0.02,
            "expected ~0.8 Centro, got {frequency}"
        );
    }

    #[test]
    fn hours_stay_inside_the_drawn_bucket() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = GeneratorConfig {
            factor: 20,
            ..GeneratorConfig::default()
        };
        let rows =
            generate_non_accidents(&population(), &config, &BTreeMap::new(), &mut rng).unwrap();
        for row in &rows {
            assert_eq!(
                TimeBucket::from_hour(row.occurred_at.hour()),
                row.time_bucket,
                "hour {} outside bucket {:?}",
                row.occurred_at.hour(),
                row.time_bucket
            );
        }
    }

    #[test]
    fn timestamps_stay_inside_the_observed_date_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = generate_non_accidents(
            &population(),
            &GeneratorConfig::default(),
            &BTreeMap::new(),
            &mut rng,
        )
        .unwrap();
        let first = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        for row in &rows {
            let date = row.occurred_at.date();
            assert!(date >= first && date <= last);
        }
    }

    #[test]
    fn derived_fields_match_the_aggregation_formulas() {
        let mut rng = StdRng::seed_from_u64(8);
        let rows = generate_non_accidents(
            &population(),
            &GeneratorConfig::default(),
            &BTreeMap::new(),
            &mut rng,
        )
        .unwrap();
        for row in &rows {
            assert_eq!(row.total_involved, row.derived_total_involved());
            assert_eq!(row.vehicle_diversity, row.derived_vehicle_diversity());
            assert_eq!(row.has_vulnerable, row.pedestrians > 0);
            assert!((1..4).contains(&row.drivers));
            assert!(row.passengers < 3);
            assert!(row.pedestrians < 2);
        }
    }

    #[test]
    fn district_tier_is_reused_from_the_mapping() {
        let mut tiers = BTreeMap::new();
        tiers.insert("Centro".to_string(), DistrictTier::Alto);
        tiers.insert("Retiro".to_string(), DistrictTier::Bajo);
        let mut rng = StdRng::seed_from_u64(9);
        let rows =
            generate_non_accidents(&population(), &GeneratorConfig::default(), &tiers, &mut rng)
                .unwrap();
        for row in &rows {
            let expected = match row.district.as_str() {
                "Centro" => Some(DistrictTier::Alto),
                "Retiro" => Some(DistrictTier::Bajo),
                other => panic!("unexpected district {other}"),
            };
            assert_eq!(row.district_tier, expected);
        }
    }
}

//! Severity index computation.
//!
//! Every contribution is applied independently and summed: structural
//! bonuses (pedestrians, vehicle mix, involvement counts) plus the first
//! matching rule of each keyword table and the hour range. A field the
//! row does not carry simply contributes nothing.

use accidentalidad_models::AccidentAggregate;
use chrono::Timelike as _;

use crate::config::{SeverityConfig, first_match};

/// Computes the severity index for one aggregated accident, rounded to two
/// decimal places.
#[must_use]
pub fn severity_index(accident: &AccidentAggregate, config: &SeverityConfig) -> f64 {
    let mut severity = config.base;

    if accident.pedestrians > 0 {
        severity += config.pedestrian_bonus;
    }
    if accident.two_wheelers > 0 {
        severity += config.two_wheeler_bonus;
    }
    if accident.heavy_vehicles > 0 {
        severity += config.heavy_vehicle_bonus;
    }

    severity += f64::from(accident.total_involved.saturating_sub(1)) * config.per_extra_involved;
    severity +=
        f64::from(accident.vehicle_diversity.saturating_sub(1)) * config.per_extra_diversity;

    if let Some(accident_type) = &accident.accident_type {
        severity += first_match(&config.accident_type_rules, &accident_type.to_lowercase());
    }
    severity += config.hour_weight(accident.occurred_at.hour());
    severity += first_match(&config.day_rules, &accident.day_of_week.to_lowercase());
    severity += first_match(&config.weather_rules, &accident.weather.to_lowercase());

    (severity * 100.0).round() / 100.0
}

/// Fills `severity_index` for every row of a real-accident population.
pub fn score_population(accidents: &mut [AccidentAggregate], config: &SeverityConfig) {
    log::info!("scoring {} accidents", accidents.len());
    for accident in accidents {
        accident.severity_index = severity_index(accident, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accidentalidad_models::{AccidentLabel, SeverityLabel, TimeBucket};
    use chrono::NaiveDate;

    /// Base accident with no special factors: single passenger-car driver,
    /// unmatched type, midday Tuesday, clear weather.
    fn base_accident() -> AccidentAggregate {
        let occurred_at = NaiveDate::from_ymd_opt(2023, 10, 24) // a Tuesday
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        AccidentAggregate {
            id: "2023S000001".to_string(),
            occurred_at,
            district: "Centro".to_string(),
            district_tier: None,
            accident_type: Some("Otro".to_string()),
            weather: "Despejado".to_string(),
            day_of_week: "Martes".to_string(),
            time_bucket: TimeBucket::Tarde,
            drivers: 1,
            passengers: 0,
            pedestrians: 0,
            two_wheelers: 0,
            heavy_vehicles: 0,
            cars: 1,
            other_vehicles: 0,
            total_involved: 1,
            has_vulnerable: false,
            vehicle_diversity: 1,
            severity_index: 0.0,
            severity: SeverityLabel::Ninguno,
            label: AccidentLabel::Accident,
        }
    }

    #[test]
    fn base_case_scores_the_base_plus_midday() {
        // 1.0 base + 0.1 midday hour; everything else contributes 0.
        let score = severity_index(&base_accident(), &SeverityConfig::default());
        assert!((score - 1.1).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn pedestrian_adds_exactly_three() {
        let mut accident = base_accident();
        let without = severity_index(&accident, &SeverityConfig::default());
        accident.pedestrians = 1;
        accident.total_involved += 1;
        let with = severity_index(&accident, &SeverityConfig::default());
        // +3.0 pedestrian bonus +0.1 extra involved.
        assert!((with - without - 3.1).abs() < 1e-9);
    }

    #[test]
    fn documented_literal_case_scores_8_5() {
        // {pedestrians=1, type="colisión frontal", weather="nevando",
        //  hour=3, day="Lunes"}:
        // 1.0 base + 3.0 pedestrian + 1.8 type + 0.6 hour + 0.1 day
        // + 2.0 snow = 8.5
        let occurred_at = NaiveDate::from_ymd_opt(2024, 1, 8) // a Monday
            .unwrap()
            .and_hms_opt(3, 15, 0)
            .unwrap();
        let mut accident = base_accident();
        accident.occurred_at = occurred_at;
        accident.day_of_week = "Lunes".to_string();
        accident.time_bucket = TimeBucket::Madrugada;
        accident.pedestrians = 1;
        accident.total_involved = 1;
        accident.drivers = 0;
        accident.cars = 0;
        accident.vehicle_diversity = 0;
        accident.accident_type = Some("Colisión frontal".to_string());
        accident.weather = "Nevando".to_string();
        // diversity 0 contributes 0.15 * (0 - 1) saturating to 0.
        // involvement 1 contributes 0.
        let score = severity_index(&accident, &SeverityConfig::default());
        assert!((score - 8.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn contributions_accumulate_across_categories() {
        let mut accident = base_accident();
        accident.two_wheelers = 1;
        accident.heavy_vehicles = 1;
        accident.vehicle_diversity = 3;
        accident.drivers = 3;
        accident.total_involved = 3;
        // 1.0 + 1.8 + 1.5 + 0.2 involved + 0.3 diversity + 0.1 hour
        let score = severity_index(&accident, &SeverityConfig::default());
        assert!((score - 4.9).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn missing_accident_type_contributes_zero() {
        let mut accident = base_accident();
        accident.accident_type = None;
        let score = severity_index(&accident, &SeverityConfig::default());
        assert!((score - 1.1).abs() < 1e-9);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let mut accident = base_accident();
        accident.vehicle_diversity = 2;
        // 1.0 + 0.1 hour + 0.15 diversity = 1.25
        let score = severity_index(&accident, &SeverityConfig::default());
        assert!((score - 1.25).abs() < 1e-9);
        assert!((score * 100.0 - (score * 100.0).round()).abs() < 1e-9);
    }

    #[test]
    fn score_population_fills_every_row() {
        let mut accidents = vec![base_accident(), base_accident()];
        score_population(&mut accidents, &SeverityConfig::default());
        assert!(accidents.iter().all(|a| a.severity_index > 0.0));
    }
}

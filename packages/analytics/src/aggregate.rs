//! Participant aggregation: one consolidated row per accident identifier.
//!
//! Collapses the per-involvement rows of each accident into a single
//! [`AccidentAggregate`] with person-role counts, vehicle-category counts
//! (driver rows only), and the derived involvement features. The pass is a
//! pure transform over the materialized input; it never mutates the rows it
//! reads.

use std::collections::BTreeMap;

use accidentalidad_classify::{temporal, vehicle::VehicleKeywords};
use accidentalidad_models::{
    AccidentAggregate, AccidentLabel, AccidentRecord, DistrictTier, PersonRole, SeverityLabel,
    VehicleCategory,
};

use crate::AnalyticsError;

/// Weather labels the upstream feed uses for "unknown"; normalized to clear
/// conditions before aggregation.
const UNKNOWN_WEATHER: &[&str] = &["Se desconoce", "se desconoce", ""];

/// Vehicle-type placeholders normalized to the dominant passenger-car label
/// before classification.
const UNKNOWN_VEHICLE: &[&str] = &["", "0", "Sin especificar", "sin especificar"];

/// Normalizes an upstream weather label, mapping unknown markers to
/// "Despejado".
fn normalize_weather(raw: &str) -> &str {
    if UNKNOWN_WEATHER.contains(&raw) {
        log::debug!("unknown weather label {raw:?} normalized to Despejado");
        "Despejado"
    } else {
        raw
    }
}

/// Normalizes an upstream vehicle-type label, mapping placeholder values to
/// "Turismo".
fn normalize_vehicle(raw: &str) -> &str {
    if UNKNOWN_VEHICLE.contains(&raw) {
        log::debug!("unspecified vehicle type {raw:?} normalized to Turismo");
        "Turismo"
    } else {
        raw
    }
}

/// Aggregates all per-involvement rows into one row per accident
/// identifier.
///
/// Rows are grouped by identifier (deterministic identifier order); each
/// group is verified against the upstream invariant that its rows agree on
/// timestamp, district, accident type, and weather. Person roles outside
/// the three known labels are skipped (logged at `debug`), and vehicle
/// types are classified through `keywords` for driver rows only. Districts
/// absent from `tiers` leave the tier unset.
///
/// # Errors
///
/// * [`AnalyticsError::EmptyPopulation`] when `records` is empty.
/// * [`AnalyticsError::InconsistentGroup`] when a group violates the
///   shared-field invariant; silently picking one row would mask upstream
///   data-quality problems.
pub fn aggregate_accidents(
    records: &[AccidentRecord],
    tiers: &BTreeMap<String, DistrictTier>,
    keywords: &VehicleKeywords,
) -> Result<Vec<AccidentAggregate>, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyPopulation {
            operation: "aggregate accidents",
        });
    }

    let mut groups: BTreeMap<&str, Vec<&AccidentRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.id.as_str()).or_default().push(record);
    }

    log::info!(
        "aggregating {} rows into {} accidents",
        records.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(id, rows)| aggregate_group(id, &rows, tiers, keywords))
        .collect()
}

/// Builds the consolidated row for one accident's involvement rows.
fn aggregate_group(
    id: &str,
    rows: &[&AccidentRecord],
    tiers: &BTreeMap<String, DistrictTier>,
    keywords: &VehicleKeywords,
) -> Result<AccidentAggregate, AnalyticsError> {
    let first = rows[0];
    let weather = normalize_weather(&first.weather);
    verify_group_invariant(id, first, weather, rows)?;

    let mut drivers = 0;
    let mut passengers = 0;
    let mut pedestrians = 0;
    let mut vehicle_counts = [0u32; 4];

    for row in rows {
        let Some(role) = PersonRole::from_label(&row.person_role) else {
            log::debug!("accident {id}: skipping unknown person role {:?}", row.person_role);
            continue;
        };
        match role {
            PersonRole::Conductor => {
                drivers += 1;
                // One vehicle entry per driver row; passengers and
                // pedestrians do not contribute vehicles.
                let category = keywords.classify(normalize_vehicle(&row.vehicle_type));
                let idx = VehicleCategory::all()
                    .iter()
                    .position(|c| *c == category)
                    .unwrap_or(3);
                vehicle_counts[idx] += 1;
            }
            PersonRole::Pasajero => passengers += 1,
            PersonRole::Peaton => pedestrians += 1,
        }
    }

    let [two_wheelers, heavy_vehicles, cars, other_vehicles] = vehicle_counts;
    let total_involved = drivers + passengers + pedestrians;
    let vehicle_diversity = vehicle_counts.iter().filter(|c| **c > 0).count() as u8;
    let (day_of_week, time_bucket) = temporal::enrich(first.occurred_at);

    Ok(AccidentAggregate {
        id: id.to_string(),
        occurred_at: first.occurred_at,
        district: first.district.clone(),
        district_tier: tiers.get(&first.district).copied(),
        accident_type: Some(first.accident_type.clone()),
        weather: weather.to_string(),
        day_of_week: day_of_week.to_string(),
        time_bucket,
        drivers,
        passengers,
        pedestrians,
        two_wheelers,
        heavy_vehicles,
        cars,
        other_vehicles,
        total_involved,
        has_vulnerable: pedestrians > 0,
        vehicle_diversity,
        // Filled by the scoring and banding passes.
        severity_index: 0.0,
        severity: SeverityLabel::Ninguno,
        label: AccidentLabel::Accident,
    })
}

/// Checks that every row of a group agrees with the first on the fields the
/// upstream contract guarantees identical.
fn verify_group_invariant(
    id: &str,
    first: &AccidentRecord,
    first_weather: &str,
    rows: &[&AccidentRecord],
) -> Result<(), AnalyticsError> {
    let inconsistent = |field: &'static str| AnalyticsError::InconsistentGroup {
        id: id.to_string(),
        field,
    };
    for row in &rows[1..] {
        if row.occurred_at != first.occurred_at {
            return Err(inconsistent("timestamp"));
        }
        if row.district != first.district {
            return Err(inconsistent("district"));
        }
        if row.accident_type != first.accident_type {
            return Err(inconsistent("accident type"));
        }
        if normalize_weather(&row.weather) != first_weather {
            return Err(inconsistent("weather"));
        }
    }
    Ok(())
}

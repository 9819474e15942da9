//! District accidentality ranking.
//!
//! Counts distinct accidents per district, ranks districts by count, and
//! partitions the ranking into the four [`DistrictTier`] quartiles. The
//! split key is the rank position, not the count value, so ties in count
//! can land in adjacent tiers.

use std::collections::{BTreeMap, BTreeSet};

use accidentalidad_models::{AccidentRecord, DistrictTier};

use crate::AnalyticsError;

/// Builds the district-to-tier mapping from the full accident population.
///
/// Every district present in the input receives exactly one tier; districts
/// absent from the input have no entry. Ranking is by distinct accident
/// identifier count, descending, with ties broken by district name so the
/// mapping is deterministic.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyPopulation`] when `records` is empty,
/// since a quartile split over nothing would silently produce an empty
/// mapping and mask an upstream problem.
pub fn rank_districts(
    records: &[AccidentRecord],
) -> Result<BTreeMap<String, DistrictTier>, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyPopulation {
            operation: "rank districts",
        });
    }

    // Distinct accident ids per district.
    let mut accidents_by_district: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        accidents_by_district
            .entry(record.district.as_str())
            .or_default()
            .insert(record.id.as_str());
    }

    let mut ranking: Vec<(&str, usize)> = accidents_by_district
        .iter()
        .map(|(district, ids)| (*district, ids.len()))
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let population = ranking.len();
    let mapping = ranking
        .into_iter()
        .enumerate()
        .map(|(index, (district, count))| {
            let tier = DistrictTier::from_rank(index, population);
            log::debug!("district {district}: {count} accidents, tier {tier}");
            (district.to_string(), tier)
        })
        .collect();

    Ok(mapping)
}

//! Whole-dataset pipeline driver.
//!
//! Stages run strictly in sequence over the materialized population:
//! district ranking, participant aggregation, severity scoring, tertile
//! banding, synthetic negative generation, and finally the union of real
//! and synthetic rows (real rows first).

use accidentalidad_analytics::{aggregate::aggregate_accidents, districts::rank_districts};
use accidentalidad_classify::vehicle::VehicleKeywords;
use accidentalidad_generate::{GeneratorConfig, generate_non_accidents};
use accidentalidad_models::{AccidentAggregate, AccidentRecord};
use accidentalidad_severity::{SeverityConfig, band::assign_bands, score::score_population};
use rand::Rng;

use crate::CliError;

/// All configuration tables the pipeline stages consume. Every table has a
/// canonical `Default`; tests and callers can substitute any of them.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Vehicle-category keyword lists for the aggregator.
    pub vehicle_keywords: VehicleKeywords,
    /// Severity scoring coefficients and rule tables.
    pub severity: SeverityConfig,
    /// Synthetic negative generator settings.
    pub generator: GeneratorConfig,
}

/// Runs the full feature-engineering pipeline over the cleaned union
/// table, returning the labeled model dataset: every real accident
/// (label 1, banded severity) followed by the synthetic non-accidents
/// (label 0, sentinel severity).
///
/// # Errors
///
/// Propagates the first data-quality failure from any stage: empty
/// populations, inconsistent accident groups.
pub fn run<R: Rng + ?Sized>(
    records: &[AccidentRecord],
    config: &PipelineConfig,
    rng: &mut R,
) -> Result<Vec<AccidentAggregate>, CliError> {
    let tiers = rank_districts(records)?;
    log::info!("ranked {} districts", tiers.len());

    let mut accidents = aggregate_accidents(records, &tiers, &config.vehicle_keywords)?;
    score_population(&mut accidents, &config.severity);
    assign_bands(&mut accidents)?;

    let synthetic = generate_non_accidents(&accidents, &config.generator, &tiers, rng)?;
    log::info!(
        "dataset: {} accidents + {} non-accidents",
        accidents.len(),
        synthetic.len()
    );

    accidents.extend(synthetic);
    Ok(accidents)
}

//! Tertile severity banding.
//!
//! A whole-population pass: the computed severity indices are split into
//! three equal-population bands by value (empirical tertiles with linear
//! interpolation), labelled ascending Bajo / Medio / Alto.

use accidentalidad_models::{AccidentAggregate, SeverityBand, SeverityLabel};

use crate::SeverityError;

/// Linear-interpolated quantile of an ascending-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower].mul_add(1.0 - fraction, sorted[upper] * fraction)
    }
}

/// Assigns the tertile severity band to every row from its severity index.
///
/// # Errors
///
/// Returns [`SeverityError::EmptyPopulation`] when fewer than three rows
/// are present; tertile edges over a near-empty population would be
/// degenerate.
pub fn assign_bands(accidents: &mut [AccidentAggregate]) -> Result<(), SeverityError> {
    if accidents.len() < 3 {
        return Err(SeverityError::EmptyPopulation {
            rows: accidents.len(),
        });
    }

    let mut sorted: Vec<f64> = accidents.iter().map(|a| a.severity_index).collect();
    sorted.sort_by(f64::total_cmp);
    let lower_edge = quantile(&sorted, 1.0 / 3.0);
    let upper_edge = quantile(&sorted, 2.0 / 3.0);
    log::info!(
        "severity tertile edges: {lower_edge:.2} / {upper_edge:.2} over {} accidents",
        accidents.len()
    );

    for accident in accidents {
        let band = if accident.severity_index <= lower_edge {
            SeverityBand::Bajo
        } else if accident.severity_index <= upper_edge {
            SeverityBand::Medio
        } else {
            SeverityBand::Alto
        };
        accident.severity = SeverityLabel::Band(band);
    }
    Ok(())
}

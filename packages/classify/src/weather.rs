//! Precipitation-to-sky-condition classifier.
//!
//! Maps an hourly precipitation reading (mm/h) to one of the five discrete
//! sky conditions used by the upstream weather enrichment. Thresholds are
//! an ordered `(lower bound, label)` table so alternative bucketings can be
//! injected in tests.

use accidentalidad_models::SkyCondition;
use serde::{Deserialize, Serialize};

/// Ordered precipitation thresholds, ascending by lower bound.
///
/// A reading classifies as the label of the last rule whose lower bound it
/// reaches; readings below every bound (including zero, negatives, and the
/// sub-drizzle gap below the first bound) classify as
/// [`SkyCondition::Despejado`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherThresholds {
    /// `(lower_bound_mm_per_hour, label)`, ascending.
    pub rules: Vec<(f64, SkyCondition)>,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            rules: vec![
                (0.1, SkyCondition::LluviaDebil),
                (2.0, SkyCondition::LluviaModerada),
                (10.0, SkyCondition::LluviaFuerte),
                (50.0, SkyCondition::LluviaTorrencial),
            ],
        }
    }
}

impl WeatherThresholds {
    /// Classifies a precipitation reading into a sky condition.
    ///
    /// Missing, non-finite, and zero readings map to
    /// [`SkyCondition::Despejado`]; every finite input maps to exactly one
    /// label. Bounds are half-open and lower-inclusive.
    #[must_use]
    pub fn classify(&self, mm_per_hour: Option<f64>) -> SkyCondition {
        let Some(mm) = mm_per_hour else {
            return SkyCondition::Despejado;
        };
        if !mm.is_finite() || mm <= 0.0 {
            return SkyCondition::Despejado;
        }
        self.rules
            .iter()
            .rev()
            .find(|(bound, _)| mm >= *bound)
            .map_or(SkyCondition::Despejado, |(_, label)| *label)
    }
}

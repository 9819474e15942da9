//! Severity scoring configuration.
//!
//! The whole scoring rule set lives here as data: structural bonuses,
//! ordered keyword rule tables for accident type / weather / day-of-week,
//! and the hour-of-day ranges. The `Default` impl carries the canonical
//! coefficients; tests and callers can substitute their own tables.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One ordered keyword rule: the rule matches when every group in `all_of`
/// has at least one member contained in the (lowercased) input. Rules are
/// evaluated in order and the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Conjunction of keyword alternatives: every inner list must have a
    /// contained member.
    pub all_of: Vec<Vec<String>>,
    /// Contribution added when the rule matches.
    pub weight: f64,
}

impl KeywordRule {
    /// Builds a rule from keyword groups.
    #[must_use]
    pub fn new(all_of: &[&[&str]], weight: f64) -> Self {
        Self {
            all_of: all_of
                .iter()
                .map(|group| group.iter().map(ToString::to_string).collect())
                .collect(),
            weight,
        }
    }

    /// Returns whether the rule matches the lowercased input.
    #[must_use]
    pub fn matches(&self, lower: &str) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|needle| lower.contains(needle.as_str())))
    }
}

/// Evaluates an ordered rule table against a lowercased label, returning
/// the first matching rule's weight, or 0 when nothing matches
/// (unclassified categories contribute nothing by policy).
#[must_use]
pub fn first_match(rules: &[KeywordRule], lower: &str) -> f64 {
    rules
        .iter()
        .find(|rule| rule.matches(lower))
        .map_or(0.0, |rule| rule.weight)
}

/// The full severity scoring table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityConfig {
    /// Base value every accident starts from.
    pub base: f64,
    /// Added when any pedestrian is involved.
    pub pedestrian_bonus: f64,
    /// Added when any two-wheeled vehicle is involved.
    pub two_wheeler_bonus: f64,
    /// Added when any heavy vehicle is involved.
    pub heavy_vehicle_bonus: f64,
    /// Multiplied by (total involved - 1).
    pub per_extra_involved: f64,
    /// Multiplied by (vehicle diversity - 1).
    pub per_extra_diversity: f64,
    /// Ordered accident-type rules, first match wins.
    pub accident_type_rules: Vec<KeywordRule>,
    /// Ordered weather rules, first match wins.
    pub weather_rules: Vec<KeywordRule>,
    /// Ordered day-of-week rules, first match wins.
    pub day_rules: Vec<KeywordRule>,
    /// Half-open clock-hour ranges and their contributions.
    pub hour_rules: Vec<(Range<u32>, f64)>,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            base: 1.0,
            pedestrian_bonus: 3.0,
            two_wheeler_bonus: 1.8,
            heavy_vehicle_bonus: 1.5,
            per_extra_involved: 0.1,
            per_extra_diversity: 0.15,
            // Order matters: the atropello/animal rule must precede the
            // generic atropello rule, and the fronto-lateral rule must
            // precede plain lateral.
            accident_type_rules: vec![
                KeywordRule::new(&[&["atropello"], &["animal"]], 1.0),
                KeywordRule::new(&[&["atropello"]], 2.0),
                KeywordRule::new(&[&["colisión frontal"]], 1.8),
                KeywordRule::new(&[&["colisión fronto-lateral", "fronto"]], 1.5),
                KeywordRule::new(&[&["colisión lateral"]], 1.2),
                KeywordRule::new(&[&["colisión múltiple", "multiple"]], 1.7),
                KeywordRule::new(&[&["alcance"]], 1.0),
                KeywordRule::new(&[&["choque"], &["obstáculo"]], 1.3),
                KeywordRule::new(&[&["vuelco"]], 1.7),
                KeywordRule::new(&[&["caída", "caida"]], 1.6),
                KeywordRule::new(&[&["salida"], &["vía"]], 1.4),
                KeywordRule::new(&[&["solo salida"]], 1.4),
                KeywordRule::new(&[&["despeñamiento", "despen"]], 1.9),
            ],
            // "llubia intensa" keeps the upstream feed's historical typo;
            // the precipitation classifier's moderate/strong/torrential
            // labels fall through to 0 on purpose.
            weather_rules: vec![
                KeywordRule::new(&[&["despejado"]], 0.0),
                KeywordRule::new(&[&["lluvia débil", "lluvia debil"]], 0.8),
                KeywordRule::new(&[&["lluvia intensa", "llubia intensa"]], 1.5),
                KeywordRule::new(&[&["granizando", "granizo"]], 1.8),
                KeywordRule::new(&[&["nevando", "nieve"]], 2.0),
                KeywordRule::new(&[&["nublado"]], 0.3),
            ],
            day_rules: vec![
                KeywordRule::new(&[&["viernes"]], 0.2),
                KeywordRule::new(&[&["sábado", "sabado"]], 0.3),
                KeywordRule::new(&[&["domingo"]], 0.3),
                KeywordRule::new(&[&["lunes", "lun"]], 0.1),
            ],
            hour_rules: vec![
                (0..6, 0.6),
                (6..9, 0.4),
                (9..17, 0.1),
                (17..20, 0.4),
                (20..23, 0.5),
                (23..24, 0.0),
            ],
        }
    }
}

impl SeverityConfig {
    /// Returns the contribution for a clock hour, 0 when no range matches.
    #[must_use]
    pub fn hour_weight(&self, hour: u32) -> f64 {
        self.hour_rules
            .iter()
            .find(|(range, _)| range.contains(&hour))
            .map_or(0.0, |(_, weight)| *weight)
    }
}

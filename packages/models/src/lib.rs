#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Accident domain types and categorical taxonomies.
//!
//! This crate defines the canonical row shapes and label sets used across
//! the entire accidentalidad pipeline: the per-involvement input row, the
//! per-accident aggregate row, and the categorical taxonomies (district
//! tier, time-of-day bucket, sky condition, person role, vehicle category,
//! severity band). Label spellings match the upstream Madrid open-data
//! vocabulary, so several `Display` forms carry Spanish diacritics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Discrete sky condition derived from an hourly precipitation reading.
///
/// Produced by the precipitation classifier; ordered from dry to heaviest
/// rainfall.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SkyCondition {
    /// No precipitation (also the fallback for missing readings).
    Despejado,
    /// Light rain, [0.1, 2) mm/h.
    #[strum(serialize = "Lluvia débil")]
    #[serde(rename = "Lluvia débil")]
    LluviaDebil,
    /// Moderate rain, [2, 10) mm/h.
    #[strum(serialize = "Lluvia moderada")]
    #[serde(rename = "Lluvia moderada")]
    LluviaModerada,
    /// Strong rain, [10, 50) mm/h.
    #[strum(serialize = "Lluvia fuerte")]
    #[serde(rename = "Lluvia fuerte")]
    LluviaFuerte,
    /// Torrential rain, 50 mm/h and above.
    #[strum(serialize = "Lluvia torrencial")]
    #[serde(rename = "Lluvia torrencial")]
    LluviaTorrencial,
}

impl SkyCondition {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Despejado,
            Self::LluviaDebil,
            Self::LluviaModerada,
            Self::LluviaFuerte,
            Self::LluviaTorrencial,
        ]
    }
}

/// District accidentality tier, assigned by rank-based quartile split over
/// the per-district distinct-accident counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DistrictTier {
    /// Top quartile by accident count.
    Alto,
    /// Second quartile.
    #[strum(serialize = "Medio-Alto")]
    #[serde(rename = "Medio-Alto")]
    MedioAlto,
    /// Third quartile.
    #[strum(serialize = "Medio-Bajo")]
    #[serde(rename = "Medio-Bajo")]
    MedioBajo,
    /// Bottom quartile.
    Bajo,
}

impl DistrictTier {
    /// Returns the tier for position `index` in a descending-count ranking
    /// of `population` districts.
    ///
    /// The split key is the rank position, not the count value, so
    /// count ties can land in different tiers. Degenerate populations
    /// (fewer than 4 districts) still partition without gaps.
    ///
    /// # Panics
    ///
    /// Panics if `population` is zero or `index >= population`.
    #[must_use]
    pub fn from_rank(index: usize, population: usize) -> Self {
        assert!(
            index < population,
            "rank index {index} out of range for population {population}"
        );
        match index * 4 / population {
            0 => Self::Alto,
            1 => Self::MedioAlto,
            2 => Self::MedioBajo,
            _ => Self::Bajo,
        }
    }
}

/// Four-bucket time-of-day label. Half-open, lower-inclusive hour ranges
/// with Madrugada covering the wrap-around (22-24 and 0-6).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TimeBucket {
    /// [6, 12)
    #[strum(serialize = "Mañana")]
    #[serde(rename = "Mañana")]
    Manana,
    /// [12, 18)
    Tarde,
    /// [18, 22)
    Noche,
    /// [22, 24) and [0, 6)
    Madrugada,
}

impl TimeBucket {
    /// Returns the bucket for a clock hour (0-23). Total over all hours.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Manana,
            12..=17 => Self::Tarde,
            18..=21 => Self::Noche,
            _ => Self::Madrugada,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Manana, Self::Tarde, Self::Noche, Self::Madrugada]
    }
}

/// Severity band assigned by empirical tertile split over the computed
/// severity index, ascending.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SeverityBand {
    Bajo,
    Medio,
    Alto,
}

/// Severity label for a dataset row.
///
/// Real accidents carry one of the three tertile bands; synthetic
/// non-accident rows carry the `Ninguno` sentinel, which is deliberately a
/// separate variant rather than a fourth band so the two populations cannot
/// be confused downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLabel {
    /// Tertile band of a real accident.
    Band(SeverityBand),
    /// Sentinel for synthetic non-accident rows.
    Ninguno,
}

impl SeverityLabel {
    /// Returns the label as the string stored in the output dataset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Band(SeverityBand::Bajo) => "Bajo",
            Self::Band(SeverityBand::Medio) => "Medio",
            Self::Band(SeverityBand::Alto) => "Alto",
            Self::Ninguno => "Ninguno",
        }
    }
}

impl std::fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeverityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bajo" => Ok(Self::Band(SeverityBand::Bajo)),
            "Medio" => Ok(Self::Band(SeverityBand::Medio)),
            "Alto" => Ok(Self::Band(SeverityBand::Alto)),
            "Ninguno" => Ok(Self::Ninguno),
            other => Err(format!("unknown severity label: {other}")),
        }
    }
}

impl Serialize for SeverityLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SeverityLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Binary classification label for the model dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccidentLabel {
    /// A real, observed accident.
    Accident,
    /// A synthesized non-accident row.
    NonAccident,
}

impl AccidentLabel {
    /// Returns the numeric form written to the output dataset (1 or 0).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Accident => 1,
            Self::NonAccident => 0,
        }
    }
}

impl Serialize for AccidentLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for AccidentLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Accident),
            0 => Ok(Self::NonAccident),
            other => Err(serde::de::Error::custom(format!(
                "invalid accident label {other}: expected 0 or 1"
            ))),
        }
    }
}

/// Role of one involved person in an accident row.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PersonRole {
    Conductor,
    Pasajero,
    #[strum(serialize = "Peatón")]
    #[serde(rename = "Peatón")]
    Peaton,
}

impl PersonRole {
    /// Maps a raw role label to the canonical role, case-insensitively.
    ///
    /// Returns `None` for labels outside the three known roles; callers
    /// are expected to skip those rows rather than fail.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();
        if lower.contains("conductor") {
            Some(Self::Conductor)
        } else if lower.contains("pasajero") {
            Some(Self::Pasajero)
        } else if lower.contains("peat") {
            Some(Self::Peaton)
        } else {
            None
        }
    }
}

/// General vehicle category a raw vehicle-type label is folded into.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum VehicleCategory {
    /// Motorcycles, mopeds, bicycles, scooters, personal mobility devices.
    #[strum(serialize = "Vehículo de dos ruedas")]
    #[serde(rename = "Vehículo de dos ruedas")]
    TwoWheeler,
    /// Trucks, buses, emergency services, heavy machinery, trailers.
    #[strum(serialize = "Vehículo pesado")]
    #[serde(rename = "Vehículo pesado")]
    Heavy,
    /// Passenger cars, SUVs, motorhomes.
    Turismo,
    /// Anything the keyword tables do not match.
    #[strum(serialize = "Otros vehículos")]
    #[serde(rename = "Otros vehículos")]
    Other,
}

impl VehicleCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::TwoWheeler, Self::Heavy, Self::Turismo, Self::Other]
    }
}

/// One row of the upstream-cleaned accident table: a single
/// person/vehicle involvement. The accident identifier is shared by all
/// rows belonging to the same accident, which are guaranteed by the
/// upstream contract to agree on timestamp, district, accident type, and
/// weather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentRecord {
    /// Accident identifier (expediente); not unique across rows.
    pub id: String,
    /// Timestamp of the accident, local time.
    pub occurred_at: NaiveDateTime,
    /// District name.
    pub district: String,
    /// Raw accident-type label.
    pub accident_type: String,
    /// Raw weather-condition label.
    pub weather: String,
    /// Raw person-role label for this involvement.
    pub person_role: String,
    /// Raw vehicle-type label for this involvement.
    pub vehicle_type: String,
}

/// One consolidated row per accident identifier, with derived features and
/// the binary classification label.
///
/// Created once by the participant aggregator and immutable thereafter,
/// except for `severity_index` and `severity`, which are filled by the
/// scorer and the tertile banding pass over the full population. Synthetic
/// non-accident rows share this shape, with `accident_type` absent,
/// `severity_index` fixed at 0, and `severity` fixed at
/// [`SeverityLabel::Ninguno`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentAggregate {
    /// Accident identifier, or a generated `NA`-prefixed identifier for
    /// synthetic rows.
    pub id: String,
    /// Timestamp of the accident (or the sampled timestamp).
    pub occurred_at: NaiveDateTime,
    /// District name.
    pub district: String,
    /// Accidentality tier of the district, when the district appears in
    /// the tier mapping.
    pub district_tier: Option<DistrictTier>,
    /// Accident-type label; `None` on synthetic rows.
    pub accident_type: Option<String>,
    /// Weather-condition label.
    pub weather: String,
    /// Spanish day-of-week name (Lunes..Domingo).
    pub day_of_week: String,
    /// Time-of-day bucket derived from the hour.
    pub time_bucket: TimeBucket,
    /// Count of involved drivers.
    pub drivers: u32,
    /// Count of involved passengers.
    pub passengers: u32,
    /// Count of involved pedestrians.
    pub pedestrians: u32,
    /// Count of two-wheeled vehicles (driver rows only).
    pub two_wheelers: u32,
    /// Count of heavy vehicles (driver rows only).
    pub heavy_vehicles: u32,
    /// Count of passenger cars (driver rows only).
    pub cars: u32,
    /// Count of vehicles outside the other three categories.
    pub other_vehicles: u32,
    /// Sum of the three person-role counts.
    pub total_involved: u32,
    /// Whether any pedestrian was involved.
    pub has_vulnerable: bool,
    /// Number of distinct vehicle categories present (0-4).
    pub vehicle_diversity: u8,
    /// Computed severity index; 0 on synthetic rows.
    pub severity_index: f64,
    /// Severity band, or the synthetic sentinel.
    pub severity: SeverityLabel,
    /// Binary classification label.
    pub label: AccidentLabel,
}

impl AccidentAggregate {
    /// Re-derives `total_involved` from the person-role counts.
    #[must_use]
    pub const fn derived_total_involved(&self) -> u32 {
        self.drivers + self.passengers + self.pedestrians
    }

    /// Re-derives `vehicle_diversity` from the vehicle-category counts.
    #[must_use]
    pub const fn derived_vehicle_diversity(&self) -> u8 {
        (self.two_wheelers > 0) as u8
            + (self.heavy_vehicles > 0) as u8
            + (self.cars > 0) as u8
            + (self.other_vehicles > 0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_bucket_partitions_all_hours() {
        for hour in 0..24 {
            let bucket = TimeBucket::from_hour(hour);
            let expected = match hour {
                6..=11 => TimeBucket::Manana,
                12..=17 => TimeBucket::Tarde,
                18..=21 => TimeBucket::Noche,
                _ => TimeBucket::Madrugada,
            };
            assert_eq!(bucket, expected, "hour {hour}");
        }
    }

    #[test]
    fn time_bucket_boundaries() {
        assert_eq!(TimeBucket::from_hour(5), TimeBucket::Madrugada);
        assert_eq!(TimeBucket::from_hour(6), TimeBucket::Manana);
        assert_eq!(TimeBucket::from_hour(21), TimeBucket::Noche);
        assert_eq!(TimeBucket::from_hour(22), TimeBucket::Madrugada);
    }

    #[test]
    fn tier_from_rank_partitions_quartiles() {
        // 8 districts: two per tier.
        let tiers: Vec<DistrictTier> = (0..8).map(|i| DistrictTier::from_rank(i, 8)).collect();
        assert_eq!(tiers[0], DistrictTier::Alto);
        assert_eq!(tiers[1], DistrictTier::Alto);
        assert_eq!(tiers[2], DistrictTier::MedioAlto);
        assert_eq!(tiers[5], DistrictTier::MedioBajo);
        assert_eq!(tiers[7], DistrictTier::Bajo);
    }

    #[test]
    fn tier_from_rank_degenerate_population() {
        // Fewer than 4 districts still partitions without panicking.
        assert_eq!(DistrictTier::from_rank(0, 2), DistrictTier::Alto);
        assert_eq!(DistrictTier::from_rank(1, 2), DistrictTier::MedioBajo);
        assert_eq!(DistrictTier::from_rank(0, 1), DistrictTier::Alto);
    }

    #[test]
    fn severity_label_roundtrip() {
        for label in [
            SeverityLabel::Band(SeverityBand::Bajo),
            SeverityLabel::Band(SeverityBand::Medio),
            SeverityLabel::Band(SeverityBand::Alto),
            SeverityLabel::Ninguno,
        ] {
            let parsed: SeverityLabel = label.as_str().parse().unwrap();
            assert_eq!(parsed, label);
        }
        assert!("Gravísimo".parse::<SeverityLabel>().is_err());
    }

    #[test]
    fn role_from_label_is_case_insensitive() {
        assert_eq!(PersonRole::from_label("Conductor"), Some(PersonRole::Conductor));
        assert_eq!(PersonRole::from_label("PASAJERO"), Some(PersonRole::Pasajero));
        assert_eq!(PersonRole::from_label("Peatón"), Some(PersonRole::Peaton));
        assert_eq!(PersonRole::from_label("peaton"), Some(PersonRole::Peaton));
        assert_eq!(PersonRole::from_label("Testigo"), None);
    }

    #[test]
    fn spanish_display_labels() {
        assert_eq!(SkyCondition::LluviaDebil.to_string(), "Lluvia débil");
        assert_eq!(DistrictTier::MedioAlto.to_string(), "Medio-Alto");
        assert_eq!(TimeBucket::Manana.to_string(), "Mañana");
        assert_eq!(
            VehicleCategory::TwoWheeler.to_string(),
            "Vehículo de dos ruedas"
        );
    }
}

//! Vehicle type mapping utilities.
//!
//! Maps the raw vehicle-type strings from the accident table to the four
//! general [`VehicleCategory`] groups. The raw vocabulary is wide (the
//! Madrid open-data feed distinguishes dozens of vehicle types), so we use
//! keyword-based matching with [`VehicleCategory::Other`] as the catch-all.

use accidentalidad_models::VehicleCategory;
use serde::{Deserialize, Serialize};

use crate::contains_any;

/// Keyword lists driving the vehicle classification, checked in order:
/// two-wheeled, heavy, passenger car. Matching is case-insensitive
/// substring matching; a label matching no list classifies as
/// [`VehicleCategory::Other`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleKeywords {
    /// Motorcycle, moped, bicycle, scooter, and personal-mobility variants.
    pub two_wheeler: Vec<String>,
    /// Truck, bus, emergency-service, machinery, and trailer variants.
    pub heavy: Vec<String>,
    /// Passenger car, SUV, and motorhome variants.
    pub car: Vec<String>,
}

impl Default for VehicleKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(ToString::to_string).collect();
        Self {
            two_wheeler: owned(&[
                "moto",
                "ciclomotor",
                "bicicleta",
                "ciclo",
                "patinete",
                "vmu",
                "epac",
                "tres ruedas",
            ]),
            heavy: owned(&[
                "camión",
                "camion",
                "autobús",
                "autobus",
                "emt",
                "tractocamión",
                "articulado",
                "remolque",
                "semiremolque",
                "bomberos",
                "ambulancia",
                "maquinaria",
            ]),
            car: owned(&["turismo", "todo terreno", "autocaravana"]),
        }
    }
}

impl VehicleKeywords {
    /// Classifies a raw vehicle-type label into exactly one category.
    ///
    /// Case-insensitive; classification is total, with
    /// [`VehicleCategory::Other`] as the fallback for unmatched labels.
    #[must_use]
    pub fn classify(&self, raw: &str) -> VehicleCategory {
        let lower = raw.to_lowercase();
        if contains_any(&lower, &self.two_wheeler) {
            VehicleCategory::TwoWheeler
        } else if contains_any(&lower, &self.heavy) {
            VehicleCategory::Heavy
        } else if contains_any(&lower, &self.car) {
            VehicleCategory::Turismo
        } else {
            VehicleCategory::Other
        }
    }
}

//! CSV boundary adapter.
//!
//! Maps the upstream-cleaned union table (one row per person/vehicle
//! involvement, Spanish column names) to [`AccidentRecord`] values, and
//! writes the labeled model dataset back out with the original Spanish
//! column vocabulary so downstream consumers see the schema they expect.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use accidentalidad_models::{AccidentAggregate, AccidentRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Accepted timestamp layouts in the `dia_hora` column.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One raw row of the upstream union CSV.
#[derive(Debug, Deserialize)]
struct RawRow {
    num_expediente: String,
    dia_hora: String,
    distrito: String,
    tipo_accidente: String,
    #[serde(rename = "estado_meteorológico")]
    estado_meteorologico: String,
    tipo_vehiculo: String,
    tipo_persona: String,
}

/// One row of the output model dataset, in the downstream column
/// vocabulary.
#[derive(Debug, Serialize)]
struct OutputRow {
    num_expediente: String,
    dia_hora: String,
    distrito: String,
    grupo_distrito: String,
    tipo_accidente: String,
    #[serde(rename = "estado_meteorológico")]
    estado_meteorologico: String,
    dia_semana: String,
    franja_horaria: String,
    #[serde(rename = "Conductores")]
    conductores: u32,
    #[serde(rename = "Pasajeros")]
    pasajeros: u32,
    #[serde(rename = "Peatones")]
    peatones: u32,
    #[serde(rename = "Vehículo de dos ruedas")]
    vehiculo_dos_ruedas: u32,
    #[serde(rename = "Vehículo pesado")]
    vehiculo_pesado: u32,
    #[serde(rename = "Turismo")]
    turismo: u32,
    #[serde(rename = "Otros vehículos")]
    otros_vehiculos: u32,
    total_implicados: u32,
    tiene_vulnerables: u8,
    diversidad_vehiculos: u8,
    indice_gravedad: f64,
    categoria_gravedad: String,
    es_accidente: u8,
}

impl From<&AccidentAggregate> for OutputRow {
    fn from(row: &AccidentAggregate) -> Self {
        Self {
            num_expediente: row.id.clone(),
            dia_hora: row.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            distrito: row.district.clone(),
            grupo_distrito: row
                .district_tier
                .map_or_else(String::new, |tier| tier.to_string()),
            tipo_accidente: row.accident_type.clone().unwrap_or_default(),
            estado_meteorologico: row.weather.clone(),
            dia_semana: row.day_of_week.clone(),
            franja_horaria: row.time_bucket.to_string(),
            conductores: row.drivers,
            pasajeros: row.passengers,
            peatones: row.pedestrians,
            vehiculo_dos_ruedas: row.two_wheelers,
            vehiculo_pesado: row.heavy_vehicles,
            turismo: row.cars,
            otros_vehiculos: row.other_vehicles,
            total_implicados: row.total_involved,
            tiene_vulnerables: u8::from(row.has_vulnerable),
            diversidad_vehiculos: row.vehicle_diversity,
            indice_gravedad: row.severity_index,
            categoria_gravedad: row.severity.to_string(),
            es_accidente: row.label.value(),
        }
    }
}

/// Parses a `dia_hora` timestamp, trying each accepted layout.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CliError> {
    let mut last_error = None;
    for format in TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(raw, format) {
            Ok(parsed) => return Ok(parsed),
            Err(error) => last_error = Some(error),
        }
    }
    Err(CliError::Timestamp {
        value: raw.to_string(),
        source: last_error.expect("TIMESTAMP_FORMATS is non-empty"),
    })
}

/// Reads involvement rows from any CSV reader.
///
/// # Errors
///
/// Returns an error when a row fails to deserialize or carries an
/// unparseable timestamp.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<AccidentRecord>, CliError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<RawRow>() {
        let raw = row?;
        records.push(AccidentRecord {
            occurred_at: parse_timestamp(&raw.dia_hora)?,
            id: raw.num_expediente,
            district: raw.distrito,
            accident_type: raw.tipo_accidente,
            weather: raw.estado_meteorologico,
            person_role: raw.tipo_persona,
            vehicle_type: raw.tipo_vehiculo,
        });
    }
    log::info!("read {} involvement rows", records.len());
    Ok(records)
}

/// Reads involvement rows from a CSV file.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or parsed.
pub fn read_records(path: &Path) -> Result<Vec<AccidentRecord>, CliError> {
    read_records_from(File::open(path)?)
}

/// Writes the labeled model dataset to any writer.
///
/// # Errors
///
/// Returns an error when serialization or the underlying write fails.
pub fn write_dataset_to<W: Write>(
    writer: W,
    rows: &[AccidentAggregate],
) -> Result<(), CliError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(OutputRow::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the labeled model dataset to a CSV file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub fn write_dataset(path: &Path, rows: &[AccidentAggregate]) -> Result<(), CliError> {
    write_dataset_to(File::create(path)?, rows)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

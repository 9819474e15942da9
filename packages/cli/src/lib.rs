#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pipeline orchestration and the CSV boundary adapter.
//!
//! The library half drives the in-memory pipeline (rank, aggregate, score,
//! band, generate, union) and maps the upstream-cleaned union CSV to and
//! from the domain row types. Raw ingestion, weather retrieval, and
//! encoding repair happen upstream; this crate only consumes their output.

pub mod io;
pub mod pipeline;

use accidentalidad_analytics::AnalyticsError;
use accidentalidad_generate::GenerateError;
use accidentalidad_severity::SeverityError;

/// Errors surfaced by a pipeline run or the CSV boundary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Analytics pass failed (ranking or aggregation).
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Severity banding failed.
    #[error(transparent)]
    Severity(#[from] SeverityError),

    /// Synthetic generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// CSV read/write failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A timestamp in the input table could not be parsed.
    #[error("unparseable timestamp {value:?}: {source}")]
    Timestamp {
        /// The raw timestamp text.
        value: String,
        /// The underlying parse failure.
        source: chrono::ParseError,
    },
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Severity index computation and severity banding.
//!
//! The index is a deterministic additive score over an accident's
//! attributes; the coefficients are fixed domain configuration calibrated
//! by hand upstream, so this crate reproduces them exactly rather than
//! fitting or adjusting them. Band assignment is a whole-population pass
//! that splits the computed indices into three equal-population bands.

pub mod band;
pub mod config;
pub mod score;

pub use config::SeverityConfig;

/// Errors raised by the severity passes.
#[derive(Debug, thiserror::Error)]
pub enum SeverityError {
    /// Tertile banding needs at least three rows to produce meaningful
    /// bands.
    #[error("cannot derive severity tertiles from {rows} rows (minimum 3)")]
    EmptyPopulation {
        /// Number of rows the banding pass received.
        rows: usize,
    },
}

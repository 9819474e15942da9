#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Whole-population analytics over the accident table: district
//! accidentality ranking and per-accident participant aggregation.
//!
//! Both operations are global, materialized passes — ranking needs every
//! district's count before any tier can be assigned, and aggregation needs
//! every row of a group before the consolidated row can be emitted.

pub mod aggregate;
pub mod districts;

/// Errors raised by the analytics passes. All variants are data-quality
/// failures; there is no I/O in this crate.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A ranking or aggregation pass received no rows.
    #[error("cannot {operation} over an empty accident population")]
    EmptyPopulation {
        /// The operation that required a non-empty population.
        operation: &'static str,
    },

    /// Rows sharing an accident identifier disagree on a field that the
    /// upstream contract guarantees identical across the group.
    #[error("accident {id}: constituent rows disagree on {field}")]
    InconsistentGroup {
        /// The offending accident identifier.
        id: String,
        /// The field the rows disagree on.
        field: &'static str,
    },
}

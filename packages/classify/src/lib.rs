#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Classification lookup tables for the accident pipeline.
//!
//! Each classifier here is a total function driven by an explicit
//! configuration table (thresholds or keyword lists) rather than branching
//! code, so the tables can be substituted in tests and extended without
//! touching the matching logic.

pub mod temporal;
pub mod vehicle;
pub mod weather;

/// Checks if `haystack` contains any of the given `needles`.
#[must_use]
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

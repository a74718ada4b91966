//! Error types for fallible construction paths.
//!
//! Only configuration loading and strategy construction return errors; geometric
//! shortfalls are plain `bool`/`Option` values and contract violations panic.

use thiserror::Error;

/// A configuration value outside its admissible range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must lie in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
    #[error("{low_field} ({low}) exceeds {high_field} ({high})")]
    Inverted {
        low_field: &'static str,
        low: f64,
        high_field: &'static str,
        high: f64,
    },
}

/// Invalid navigation-strategy setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no known and no unknown destinations given")]
    NoDestinations,
    #[error("route has no waypoints")]
    EmptyRoute,
}

//! Core analysis logic: feature extraction, scoring, aggregation and the
//! breach-lookup client. Everything here is transport-agnostic; the HTTP
//! layer lives in `crate::handlers`.

pub mod aggregate;
pub mod analyzer;
pub mod breach;
pub mod features;
pub mod heuristic;
pub mod model;

/// Errors produced by the analysis path. Remote-lookup failures are not
/// errors; they are values (see `breach::BreachOutcome`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Round to two decimals for wire output
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimals for wire output
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

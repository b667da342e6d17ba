//! Error types for scheduling simulations.
//!
//! All errors are deterministic functions of the input: nothing here is
//! transient or worth retrying. Preconditions are checked before a
//! simulation loop starts, so a running simulation never fails.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors surfaced by the simulator and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Malformed workload (length mismatch, empty, negative arrival,
    /// non-positive service).
    #[error("Invalid input: {}", join(.0))]
    InvalidInput(Vec<ValidationError>),
    /// Policy parameter out of range.
    #[error("Invalid parameter: {}", join(.0))]
    InvalidParameter(Vec<ValidationError>),
    /// The selected policy needs a parameter that was not supplied.
    #[error("{policy} requires {}", .missing.join(", "))]
    UnsupportedParameterCombination {
        policy: &'static str,
        missing: Vec<&'static str>,
    },
    /// Metrics requested over zero processes.
    #[error("Cannot aggregate an empty result set.")]
    EmptyResultSet,
    /// Configuration could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

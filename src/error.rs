//! Error types.
//!
//! Every failure surfaces as one of two kinds:
//! - [`SimError::Validation`]: the input is malformed or inconsistent.
//! - [`SimError::Simulation`]: an engine guard tripped during a run.
//!
//! Both are fatal to the requested operation and never retried.

use thiserror::Error;

use crate::validation::ValidationError;

/// Categories of simulation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationErrorKind {
    /// Round Robin quantum outside `1..=max_quantum`.
    QuantumOutOfRange,
    /// A run exceeded its step budget.
    StepLimitExceeded,
    /// A run produced no output for non-empty input.
    EmptyResult,
    /// Engine state broke a model invariant (e.g. resource slot count).
    InvariantViolated,
}

/// An internal guard violation during a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SimulationError {
    /// Error category.
    pub kind: SimulationErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl SimulationError {
    pub(crate) fn new(kind: SimulationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Input rejected; carries every problem found.
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Run aborted by an engine guard.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}

impl SimError {
    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SimError::Validation(errors) => errors,
            SimError::Simulation(_) => &[],
        }
    }

    /// Simulation error, if this is a guard failure.
    pub fn simulation_error(&self) -> Option<&SimulationError> {
        match self {
            SimError::Simulation(e) => Some(e),
            SimError::Validation(_) => None,
        }
    }
}

impl From<ValidationError> for SimError {
    fn from(error: ValidationError) -> Self {
        SimError::Validation(vec![error])
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

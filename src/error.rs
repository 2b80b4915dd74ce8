//! Error types for formulary.

use thiserror::Error;

/// Error type for modeling and solving operations.
#[derive(Debug, Error)]
pub enum FormularyError {
    /// The requested solver backend name is not recognized.
    #[error("Unknown solver backend: {0}")]
    UnknownBackend(String),

    /// The model uses a feature the selected backend cannot handle.
    #[error("Backend {backend} does not support {feature}")]
    Unsupported {
        backend: &'static str,
        feature: String,
    },

    /// Invalid model definition.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Solver error.
    #[error("Solver error: {0}")]
    SolverError(String),

    /// Numerical error.
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// A solution value was requested but no solution is available.
    #[error("No solution available: status is {0}")]
    NotSolved(crate::solver::SolveStatus),
}

/// Result type for formulary operations.
pub type Result<T> = std::result::Result<T, FormularyError>;

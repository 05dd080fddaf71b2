//! Error types for the optimizer.

use thiserror::Error;

/// Optimizer error types
#[derive(Error, Debug, Clone)]
pub enum OptimizerError {
    /// Portfolio shape or value invariant violated
    #[error("Invalid portfolio: {0}")]
    InvalidPortfolio(String),

    /// QAOA parameter invariant violated
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Propagated simulation error
    #[error("Circuit error: {0}")]
    Circuit(#[from] qfolio_circuits::CircuitError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, OptimizerError>;

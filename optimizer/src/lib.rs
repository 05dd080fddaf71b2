//! # QFolio Optimizer
//!
//! QAOA-based portfolio selection on a simulated quantum state vector.
//!
//! Given candidate assets with expected returns and a covariance (risk)
//! matrix, the engine selects a subset that heuristically minimizes
//!
//! ```text
//! cost(x) = -Σ returns[i]·x_i + risk_tolerance · Σ risk[i][j]·x_i·x_j
//! ```
//!
//! over binary selections `x ∈ {0,1}^n`. The pipeline:
//!
//! 1. [`build_qubo`] compiles portfolio data into a QUBO matrix
//! 2. [`qubo_to_ising`] maps it to Ising fields and couplings
//! 3. [`optimize`] simulates the QAOA ansatz for each shot, measures a
//!    bitstring and keeps the lowest-cost sample
//! 4. [`optimize_parameters`] grid-searches the circuit angles
//!
//! The engine is stateless between calls; each call owns its state vector
//! and matrices, so concurrent calls need no synchronization.
//!
//! ## Example
//!
//! ```rust
//! use qfolio_optimizer::{optimize, PortfolioData, QaoaParameters};
//!
//! let portfolio = PortfolioData::new(
//!     vec![0.10, 0.08],
//!     vec![vec![0.04, 0.01], vec![0.01, 0.02]],
//!     vec!["AAPL".into(), "MSFT".into()],
//!     10_000.0,
//!     1.0,
//! ).unwrap();
//!
//! let params = QaoaParameters::new(1, vec![0.5], vec![1.0], 50).unwrap();
//! let result = optimize(&portfolio, &params).unwrap();
//! assert_eq!(result.best_bitstring.len(), 2);
//! ```

pub mod cost;
pub mod error;
pub mod portfolio;
pub mod qaoa;
pub mod qubo;
pub mod tuner;

pub use cost::{expected_return, portfolio_risk, qubo_cost, selected_assets};
pub use error::{OptimizerError, Result};
pub use portfolio::PortfolioData;
pub use qaoa::{optimize, optimize_with_rng, OptimizationResult, QaoaParameters};
pub use qubo::{build_qubo, qubo_to_ising, IsingModel};
pub use tuner::optimize_parameters;

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

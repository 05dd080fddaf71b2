//! # QFolio Quantum Circuit Simulator
//!
//! A compact state-vector simulator for QAOA-style circuits.
//!
//! ## Features
//!
//! - **StateVector**: Multi-qubit amplitude vector over 2^n basis states
//! - **Gates**: In-place kernels for H, Rx, Rz and CNOT
//! - **Measurement**: Projective measurement and multi-shot sampling
//!
//! Basis states are indexed so that bit `i` of the index is qubit `i`;
//! qubit 0 is the least-significant bit. Every gate kernel and the
//! measurement decoder share this convention.
//!
//! ## Example
//!
//! ```rust
//! use qfolio_circuits::StateVector;
//!
//! // Bell state: H on qubit 0, then CNOT(0, 1)
//! let mut state = StateVector::new(2);
//! state.apply_h(0).unwrap();
//! state.apply_cnot(0, 1).unwrap();
//!
//! let mut rng = rand::thread_rng();
//! let bits = state.measure_all(&mut rng);
//! assert_eq!(bits[0], bits[1]);
//! ```

pub mod error;
pub mod gates;
pub mod measurement;
pub mod state;

pub use error::{CircuitError, Result};
pub use measurement::MeasurementStatistics;
pub use state::StateVector;

use num_complex::Complex64;

/// Complex number type alias
pub type Complex = Complex64;

/// Zero complex number
pub const ZERO: Complex = Complex64::new(0.0, 0.0);

/// One complex number
pub const ONE: Complex = Complex64::new(1.0, 0.0);

/// Imaginary unit
pub const I: Complex = Complex64::new(0.0, 1.0);

/// 1/sqrt(2) for Hadamard normalization
pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

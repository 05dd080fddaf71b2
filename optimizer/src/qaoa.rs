//! QAOA circuit executor and sampling driver.
//!
//! The ansatz alternates a cost unitary and a mixer unitary over an
//! initial uniform superposition:
//!
//! ```text
//! |ψ(β,γ)⟩ = U_B(β_p)U_C(γ_p)...U_B(β_1)U_C(γ_1)|+⟩^n
//! ```
//!
//! where `U_C(γ) = exp(-iγC)` encodes the Ising form of the portfolio
//! QUBO and `U_B(β) = exp(-iβ Σ X_i)` is the standard X mixer. Each shot
//! simulates the circuit on a fresh state vector, measures every qubit
//! and scores the resulting selection on the original QUBO; the lowest
//! cost observed wins.

use crate::cost::{expected_return, portfolio_risk, qubo_cost, selected_assets};
use crate::qubo::{build_qubo, qubo_to_ising, IsingModel};
use crate::{OptimizerError, PortfolioData, Result};
use qfolio_circuits::StateVector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Couplings at or below this magnitude are skipped; the corresponding
/// ZZ rotation would be a numerical no-op.
pub const COUPLING_THRESHOLD: f64 = 1e-10;

/// QAOA circuit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaoaParameters {
    /// Number of QAOA layers (p)
    pub layers: usize,
    /// Mixer angles, one per layer
    pub betas: Vec<f64>,
    /// Cost angles, one per layer
    pub gammas: Vec<f64>,
    /// Number of measurement shots
    pub samples: usize,
}

impl QaoaParameters {
    /// Build a parameter set, validating that both angle sequences match
    /// the layer count.
    pub fn new(layers: usize, betas: Vec<f64>, gammas: Vec<f64>, samples: usize) -> Result<Self> {
        if betas.len() != layers || gammas.len() != layers {
            return Err(OptimizerError::InvalidParameters(format!(
                "{} layers but {} betas and {} gammas",
                layers,
                betas.len(),
                gammas.len()
            )));
        }
        Ok(Self { layers, betas, gammas, samples })
    }

    /// Random angles: βs uniform in [0, π], γs uniform in [0, 2π].
    pub fn random<R: Rng>(layers: usize, samples: usize, rng: &mut R) -> Self {
        Self {
            layers,
            betas: (0..layers).map(|_| rng.gen_range(0.0..=PI)).collect(),
            gammas: (0..layers).map(|_| rng.gen_range(0.0..=2.0 * PI)).collect(),
            samples,
        }
    }

    /// Identical angle across all layers.
    pub fn uniform(layers: usize, beta: f64, gamma: f64, samples: usize) -> Self {
        Self {
            layers,
            betas: vec![beta; layers],
            gammas: vec![gamma; layers],
            samples,
        }
    }
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best selection found; entry i corresponds to asset i
    pub best_bitstring: Vec<bool>,
    /// Names of the selected assets
    pub selected_assets: Vec<String>,
    /// Unweighted mean return of the selection
    pub expected_return: f64,
    /// Average pairwise risk of the selection
    pub risk: f64,
    /// QUBO energy of the best bitstring
    pub cost: f64,
    /// Number of shots taken
    pub sample_count: usize,
}

/// Prepare |+⟩^n: the zero state with H applied to every qubit.
pub fn initialize_superposition(num_qubits: usize) -> Result<StateVector> {
    let mut state = StateVector::new(num_qubits);
    for q in 0..num_qubits {
        state.apply_h(q)?;
    }
    Ok(state)
}

/// Apply the cost unitary exp(-iγC) for the given Ising model.
///
/// Local fields become Rz(2γh_i); each coupling above the threshold
/// becomes the RZZ decomposition CNOT(i,j) · Rz(2γJ_ij) on j · CNOT(i,j).
pub fn apply_cost_hamiltonian(state: &mut StateVector, ising: &IsingModel, gamma: f64) -> Result<()> {
    let n = ising.num_spins();

    for i in 0..n {
        state.apply_rz(2.0 * gamma * ising.h[i], i)?;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let coupling = ising.couplings[(i, j)];
            if coupling.abs() > COUPLING_THRESHOLD {
                state.apply_cnot(i, j)?;
                state.apply_rz(2.0 * gamma * coupling, j)?;
                state.apply_cnot(i, j)?;
            }
        }
    }

    Ok(())
}

/// Apply the X mixer exp(-iβ Σ X_i) = ⊗_i Rx(2β).
pub fn apply_mixer(state: &mut StateVector, beta: f64) -> Result<()> {
    for q in 0..state.num_qubits() {
        state.apply_rx(2.0 * beta, q)?;
    }
    Ok(())
}

/// One QAOA layer: cost unitary, then mixer.
pub fn qaoa_layer(state: &mut StateVector, ising: &IsingModel, gamma: f64, beta: f64) -> Result<()> {
    apply_cost_hamiltonian(state, ising, gamma)?;
    apply_mixer(state, beta)
}

/// Run the QAOA sampling loop with an explicit random source.
///
/// Compiles the portfolio once, then for each shot prepares a fresh
/// superposition, applies the layered ansatz, measures a bitstring and
/// keeps the sample with the strictly lowest QUBO cost. With zero layers
/// the circuit reduces to uniform random sampling over all selections;
/// with zero samples the all-false selection is returned with an
/// infinite sentinel cost.
pub fn optimize_with_rng<R: Rng>(
    portfolio: &PortfolioData,
    params: &QaoaParameters,
    rng: &mut R,
) -> Result<OptimizationResult> {
    check_shapes(portfolio, params)?;

    let n = portfolio.num_assets();
    let q = build_qubo(portfolio);
    let ising = qubo_to_ising(&q);

    debug!(
        assets = n,
        layers = params.layers,
        samples = params.samples,
        "running QAOA sampling loop"
    );

    let mut best_bits = vec![false; n];
    let mut best_cost = f64::INFINITY;

    for _ in 0..params.samples {
        let mut state = initialize_superposition(n)?;
        for layer in 0..params.layers {
            qaoa_layer(&mut state, &ising, params.gammas[layer], params.betas[layer])?;
        }

        let bits = state.measure_all(rng);
        let cost = qubo_cost(&bits, &q);
        if cost < best_cost {
            best_cost = cost;
            best_bits = bits;
        }
    }

    debug!(cost = best_cost, "sampling complete");

    Ok(OptimizationResult {
        selected_assets: selected_assets(&best_bits, &portfolio.names),
        expected_return: expected_return(&best_bits, &portfolio.returns),
        risk: portfolio_risk(&best_bits, &portfolio.risk),
        cost: best_cost,
        sample_count: params.samples,
        best_bitstring: best_bits,
    })
}

/// Run the QAOA sampling loop with a thread-local random source.
pub fn optimize(portfolio: &PortfolioData, params: &QaoaParameters) -> Result<OptimizationResult> {
    optimize_with_rng(portfolio, params, &mut rand::thread_rng())
}

fn check_shapes(portfolio: &PortfolioData, params: &QaoaParameters) -> Result<()> {
    let n = portfolio.returns.len();
    if portfolio.names.len() != n
        || portfolio.risk.len() != n
        || portfolio.risk.iter().any(|row| row.len() != n)
    {
        return Err(OptimizerError::InvalidPortfolio(
            "returns, names and risk dimensions disagree".to_string(),
        ));
    }
    if params.betas.len() != params.layers || params.gammas.len() != params.layers {
        return Err(OptimizerError::InvalidParameters(format!(
            "{} layers but {} betas and {} gammas",
            params.layers,
            params.betas.len(),
            params.gammas.len()
        )));
    }
    Ok(())
}

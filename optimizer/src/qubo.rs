//! Problem compiler: portfolio data → QUBO → Ising.

use crate::PortfolioData;
use nalgebra::{DMatrix, DVector};

/// Ising formulation of a QUBO problem.
///
/// Local fields `h` and symmetric couplings `J` with a zero diagonal. The
/// scalar offset produced by the binary-to-spin substitution is dropped;
/// it shifts every configuration's energy equally and never moves the
/// argmin.
#[derive(Debug, Clone)]
pub struct IsingModel {
    /// Local fields, length n
    pub h: DVector<f64>,
    /// Couplings, n x n symmetric with J[i][i] = 0
    pub couplings: DMatrix<f64>,
}

impl IsingModel {
    /// Number of spins
    pub fn num_spins(&self) -> usize {
        self.h.len()
    }
}

/// Compile portfolio data into a QUBO matrix over x ∈ {0,1}^n.
///
/// Reward enters as negative cost on the diagonal; the risk quadratic
/// `λ·xᵀRx` expands so the diagonal absorbs `λ·R[i][i]` once and each
/// off-diagonal entry absorbs `2λ·R[i][j]`:
///
/// ```text
/// Q[i][i] = -returns[i] + λ·risk[i][i]
/// Q[i][j] = 2λ·risk[i][j]              (i ≠ j)
/// ```
pub fn build_qubo(portfolio: &PortfolioData) -> DMatrix<f64> {
    let n = portfolio.num_assets();
    let lambda = portfolio.risk_tolerance;
    let mut q = DMatrix::zeros(n, n);

    for i in 0..n {
        q[(i, i)] -= portfolio.returns[i];
    }

    for i in 0..n {
        for j in 0..n {
            if i == j {
                q[(i, i)] += lambda * portfolio.risk[i][i];
            } else {
                q[(i, j)] += 2.0 * lambda * portfolio.risk[i][j];
            }
        }
    }

    q
}

/// Map a QUBO matrix to Ising fields and couplings via `x_i = (1 - s_i)/2`.
///
/// ```text
/// h[i]    = Q[i][i]/2 + Σ_{j>i} Q[i][j]/4 + Σ_{j<i} Q[j][i]/4
/// J[i][j] = J[j][i] = Q[i][j]/4                       (i < j)
/// ```
///
/// Only the upper triangle of `Q` feeds the couplings, so an asymmetric
/// matrix behaves as if its lower triangle were mirrored from above.
pub fn qubo_to_ising(q: &DMatrix<f64>) -> IsingModel {
    let n = q.nrows();
    let mut h = DVector::zeros(n);
    let mut couplings = DMatrix::zeros(n, n);

    for i in 0..n {
        h[i] = q[(i, i)] / 2.0;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let quarter = q[(i, j)] / 4.0;
            h[i] += quarter;
            h[j] += quarter;
            couplings[(i, j)] = quarter;
            couplings[(j, i)] = quarter;
        }
    }

    IsingModel { h, couplings }
}

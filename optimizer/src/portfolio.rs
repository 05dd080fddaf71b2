//! Portfolio input data.

use crate::{OptimizerError, Result};
use serde::{Deserialize, Serialize};

/// Candidate assets for a selection problem.
///
/// `returns[i]`, `names[i]` and row/column `i` of `risk` all describe
/// asset `i`. The risk matrix is assumed symmetric; asymmetric input is
/// not rejected, and downstream consumers read its upper triangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioData {
    /// Expected return per asset
    pub returns: Vec<f64>,
    /// Covariance (risk) matrix, n x n
    pub risk: Vec<Vec<f64>>,
    /// Asset labels
    pub names: Vec<String>,
    /// Investment budget; carried through for consumers of the result
    pub budget: f64,
    /// Scalar penalty weight on risk
    pub risk_tolerance: f64,
}

impl PortfolioData {
    /// Build a portfolio, validating the shape and value invariants.
    pub fn new(
        returns: Vec<f64>,
        risk: Vec<Vec<f64>>,
        names: Vec<String>,
        budget: f64,
        risk_tolerance: f64,
    ) -> Result<Self> {
        let n = returns.len();
        if names.len() != n {
            return Err(OptimizerError::InvalidPortfolio(format!(
                "{} returns but {} names",
                n,
                names.len()
            )));
        }
        if risk.len() != n {
            return Err(OptimizerError::InvalidPortfolio(format!(
                "risk matrix has {} rows, expected {}",
                risk.len(),
                n
            )));
        }
        for (i, row) in risk.iter().enumerate() {
            if row.len() != n {
                return Err(OptimizerError::InvalidPortfolio(format!(
                    "risk row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        if !(budget > 0.0) {
            return Err(OptimizerError::InvalidPortfolio(format!(
                "budget must be positive, got {}",
                budget
            )));
        }
        if !(risk_tolerance >= 0.0) {
            return Err(OptimizerError::InvalidPortfolio(format!(
                "risk tolerance must be non-negative, got {}",
                risk_tolerance
            )));
        }

        Ok(Self { returns, risk, names, budget, risk_tolerance })
    }

    /// Number of candidate assets
    pub fn num_assets(&self) -> usize {
        self.returns.len()
    }
}

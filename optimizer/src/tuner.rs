//! Grid-search tuner for QAOA angles.

use crate::qaoa::{optimize, QaoaParameters};
use crate::{OptimizerError, PortfolioData, Result};
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::info;

/// Scan (β, γ) over a uniform `grid_size` x `grid_size` grid in [0, π)²
/// and return the angle pair whose sampling run produced the lowest cost.
///
/// Every layer shares the same angle, and γ is scanned over the same
/// [0, π) range as β. Grid cells run in parallel; the winner is resolved
/// in scan order, so among equal costs the lowest β (then lowest γ) wins.
///
/// Each cell costs `samples` full circuit simulations, so callers should
/// keep `grid_size` and `samples` small.
pub fn optimize_parameters(
    portfolio: &PortfolioData,
    layers: usize,
    grid_size: usize,
    samples: usize,
) -> Result<QaoaParameters> {
    if grid_size == 0 {
        return Err(OptimizerError::InvalidParameters(
            "grid size must be positive".to_string(),
        ));
    }

    let step = PI / grid_size as f64;
    let cell_angles = |cell: usize| {
        let beta = (cell / grid_size) as f64 * step;
        let gamma = (cell % grid_size) as f64 * step;
        (beta, gamma)
    };

    let costs: Vec<Result<f64>> = (0..grid_size * grid_size)
        .into_par_iter()
        .map(|cell| {
            let (beta, gamma) = cell_angles(cell);
            let params = QaoaParameters::uniform(layers, beta, gamma, samples);
            optimize(portfolio, &params).map(|result| result.cost)
        })
        .collect();

    let mut best_cell = 0;
    let mut best_cost = f64::INFINITY;
    for (cell, cost) in costs.into_iter().enumerate() {
        let cost = cost?;
        if cost < best_cost {
            best_cost = cost;
            best_cell = cell;
        }
    }

    let (beta, gamma) = cell_angles(best_cell);
    info!(beta, gamma, cost = best_cost, "grid search complete");

    Ok(QaoaParameters::uniform(layers, beta, gamma, samples))
}

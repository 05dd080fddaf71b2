//! End-to-end tests for the QAOA portfolio pipeline
//!
//! Tests cover:
//! - Full optimize runs over the public API
//! - Distribution of the degenerate zero-layer circuit
//! - Grid-search tuner output shape
//! - Result serialization

use qfolio_optimizer::qaoa::initialize_superposition;
use qfolio_optimizer::{
    build_qubo, optimize_parameters, optimize_with_rng, qubo_cost, OptimizationResult,
    PortfolioData, QaoaParameters,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn four_asset_portfolio() -> PortfolioData {
    PortfolioData::new(
        vec![0.12, 0.09, 0.07, 0.15],
        vec![
            vec![0.050, 0.012, 0.008, 0.020],
            vec![0.012, 0.030, 0.010, 0.015],
            vec![0.008, 0.010, 0.025, 0.011],
            vec![0.020, 0.015, 0.011, 0.080],
        ],
        vec!["AAPL".into(), "MSFT".into(), "GOOGL".into(), "TSLA".into()],
        25_000.0,
        0.8,
    )
    .unwrap()
}

// ============================================================================
// Sampling driver
// ============================================================================

#[test]
fn test_optimize_result_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let portfolio = four_asset_portfolio();
    let params = QaoaParameters::new(2, vec![0.4, 0.9], vec![1.1, 0.6], 60).unwrap();

    let result = optimize_with_rng(&portfolio, &params, &mut rng).unwrap();

    assert_eq!(result.best_bitstring.len(), portfolio.num_assets());
    assert_eq!(result.sample_count, 60);
    let popcount = result.best_bitstring.iter().filter(|&&b| b).count();
    assert_eq!(result.selected_assets.len(), popcount);
    assert!(result.cost.is_finite());
    assert!(result.expected_return.is_finite());
    assert!(result.risk.is_finite());
}

#[test]
fn test_best_cost_matches_reported_bitstring() {
    let mut rng = StdRng::seed_from_u64(31);
    let portfolio = four_asset_portfolio();
    let params = QaoaParameters::new(1, vec![0.5], vec![1.0], 100).unwrap();

    let result = optimize_with_rng(&portfolio, &params, &mut rng).unwrap();
    let q = build_qubo(&portfolio);

    assert!((qubo_cost(&result.best_bitstring, &q) - result.cost).abs() < 1e-12);
}

#[test]
fn test_more_samples_never_worse() {
    // The best over a superset of samples from the same stream can only
    // improve or stay equal.
    let portfolio = four_asset_portfolio();

    let few = optimize_with_rng(
        &portfolio,
        &QaoaParameters::new(1, vec![0.5], vec![1.0], 10).unwrap(),
        &mut StdRng::seed_from_u64(7),
    )
    .unwrap();
    let many = optimize_with_rng(
        &portfolio,
        &QaoaParameters::new(1, vec![0.5], vec![1.0], 200).unwrap(),
        &mut StdRng::seed_from_u64(7),
    )
    .unwrap();

    assert!(many.cost <= few.cost);
}

// ============================================================================
// Zero-layer circuit distribution
// ============================================================================

#[test]
fn test_zero_layer_sampling_is_uniform() {
    // With p = 0 every shot measures the bare superposition, so the 8
    // outcomes of a 3-qubit register should be uniform. Chi-squared with
    // 7 degrees of freedom; 40 is far beyond any plausible fluctuation.
    let mut rng = StdRng::seed_from_u64(61);
    let shots = 4000;
    let mut counts = [0usize; 8];

    for _ in 0..shots {
        let mut state = initialize_superposition(3).unwrap();
        let bits = state.measure_all(&mut rng);
        let index = bits
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, &b)| acc | ((b as usize) << i));
        counts[index] += 1;
    }

    let expected = shots as f64 / 8.0;
    let chi_squared: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();

    assert!(chi_squared < 40.0, "chi-squared {} too large: {:?}", chi_squared, counts);
}

#[test]
fn test_zero_layer_optimize_shape() {
    let mut rng = StdRng::seed_from_u64(88);
    let portfolio = PortfolioData::new(
        vec![0.1, 0.2, 0.05],
        vec![
            vec![0.02, 0.0, 0.0],
            vec![0.0, 0.03, 0.0],
            vec![0.0, 0.0, 0.04],
        ],
        vec!["A".into(), "B".into(), "C".into()],
        1000.0,
        1.0,
    )
    .unwrap();
    let params = QaoaParameters::new(0, vec![], vec![], 100).unwrap();

    let result = optimize_with_rng(&portfolio, &params, &mut rng).unwrap();
    assert_eq!(result.best_bitstring.len(), 3);
    assert_eq!(result.sample_count, 100);
}

// ============================================================================
// Grid-search tuner
// ============================================================================

#[test]
fn test_tuner_returns_grid_angles() {
    let portfolio = four_asset_portfolio();
    let params = optimize_parameters(&portfolio, 1, 3, 3).unwrap();

    let step = std::f64::consts::PI / 3.0;
    let on_grid = |angle: f64| {
        (0..3).any(|k| (angle - k as f64 * step).abs() < 1e-12)
    };

    assert_eq!(params.betas.len(), 1);
    assert_eq!(params.gammas.len(), 1);
    assert!(on_grid(params.betas[0]));
    assert!(on_grid(params.gammas[0]));
}

#[test]
fn test_tuned_parameters_feed_back_into_optimize() {
    let portfolio = four_asset_portfolio();
    let params = optimize_parameters(&portfolio, 1, 2, 5).unwrap();

    let mut rng = StdRng::seed_from_u64(404);
    let result = optimize_with_rng(&portfolio, &params, &mut rng).unwrap();
    assert_eq!(result.sample_count, 5);
    assert!(result.cost.is_finite());
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_result_round_trips_through_json() {
    let mut rng = StdRng::seed_from_u64(12);
    let portfolio = four_asset_portfolio();
    let params = QaoaParameters::new(1, vec![0.5], vec![1.0], 10).unwrap();
    let result = optimize_with_rng(&portfolio, &params, &mut rng).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: OptimizationResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back.best_bitstring, result.best_bitstring);
    assert_eq!(back.selected_assets, result.selected_assets);
    assert_eq!(back.sample_count, result.sample_count);
}

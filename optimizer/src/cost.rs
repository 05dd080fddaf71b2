//! Bitstring cost evaluation and result metrics.

use nalgebra::DMatrix;

/// QUBO energy of a binary selection.
///
/// `Σ_i x_i·Q[i][i] + Σ_{i<j} x_i·x_j·Q[i][j]` — diagonal plus the strict
/// upper triangle. An empty selection costs 0.
pub fn qubo_cost(bits: &[bool], q: &DMatrix<f64>) -> f64 {
    let n = bits.len();
    let mut cost = 0.0;

    for i in 0..n {
        if bits[i] {
            cost += q[(i, i)];
            for j in (i + 1)..n {
                if bits[j] {
                    cost += q[(i, j)];
                }
            }
        }
    }

    cost
}

/// Unweighted mean of the selected assets' expected returns; 0 if none
/// are selected.
pub fn expected_return(bits: &[bool], returns: &[f64]) -> f64 {
    let selected: Vec<f64> = bits
        .iter()
        .zip(returns.iter())
        .filter(|(&b, _)| b)
        .map(|(_, &r)| r)
        .collect();

    if selected.is_empty() {
        return 0.0;
    }
    selected.iter().sum::<f64>() / selected.len() as f64
}

/// Average pairwise risk of the selection.
///
/// Sums `risk[i][j]` over all ordered selected pairs, diagonal included,
/// and divides by k² for k selected assets; 0 if none are selected.
pub fn portfolio_risk(bits: &[bool], risk: &[Vec<f64>]) -> f64 {
    let selected: Vec<usize> = bits
        .iter()
        .enumerate()
        .filter(|(_, &b)| b)
        .map(|(i, _)| i)
        .collect();

    let k = selected.len();
    if k == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for &i in &selected {
        for &j in &selected {
            total += risk[i][j];
        }
    }
    total / (k * k) as f64
}

/// Names of the selected assets, in ascending index order.
pub fn selected_assets(bits: &[bool], names: &[String]) -> Vec<String> {
    bits.iter()
        .zip(names.iter())
        .filter(|(&b, _)| b)
        .map(|(_, name)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_q() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[-0.06, 0.02, 0.01, 0.02, -0.05, 0.03, 0.01, 0.03, -0.04])
    }

    #[test]
    fn test_empty_selection_is_free() {
        let q = sample_q();
        let bits = [false, false, false];
        let risk = vec![vec![0.04, 0.01], vec![0.01, 0.02]];

        assert_eq!(qubo_cost(&bits, &q), 0.0);
        assert_eq!(expected_return(&bits, &[0.1, 0.2, 0.3]), 0.0);
        assert_eq!(portfolio_risk(&[false, false], &risk), 0.0);
        assert!(selected_assets(&bits, &["a".into(), "b".into(), "c".into()]).is_empty());
    }

    #[test]
    fn test_single_asset_identities() {
        let q = sample_q();
        let returns = [0.1, 0.2, 0.3];
        let risk = vec![
            vec![0.04, 0.01, 0.0],
            vec![0.01, 0.02, 0.0],
            vec![0.0, 0.0, 0.09],
        ];

        for i in 0..3 {
            let mut bits = [false; 3];
            bits[i] = true;
            assert_relative_eq!(qubo_cost(&bits, &q), q[(i, i)], epsilon = 1e-12);
            assert_relative_eq!(expected_return(&bits, &returns), returns[i], epsilon = 1e-12);
            assert_relative_eq!(portfolio_risk(&bits, &risk), risk[i][i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_qubo_cost_uses_upper_triangle_pairs() {
        let q = sample_q();
        let bits = [true, true, false];
        // Q[0][0] + Q[1][1] + Q[0][1]
        assert_relative_eq!(qubo_cost(&bits, &q), -0.06 - 0.05 + 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_expected_return_is_mean() {
        let bits = [true, false, true, true];
        let returns = [0.1, 0.9, 0.2, 0.3];
        assert_relative_eq!(
            expected_return(&bits, &returns),
            (0.1 + 0.2 + 0.3) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_portfolio_risk_averages_ordered_pairs() {
        let bits = [true, true];
        let risk = vec![vec![0.04, 0.01], vec![0.01, 0.02]];
        // (0.04 + 0.01 + 0.01 + 0.02) / 4
        assert_relative_eq!(portfolio_risk(&bits, &risk), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_selection_extraction() {
        let names: Vec<String> = ["AAPL", "MSFT", "GOOGL", "TSLA"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let bits = [true, false, true, false];

        assert_eq!(selected_assets(&bits, &names), vec!["AAPL", "GOOGL"]);
    }
}

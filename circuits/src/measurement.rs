//! Projective measurement and multi-shot sampling.

use crate::StateVector;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

impl StateVector {
    /// Sample one basis index from the |ψ|² distribution.
    ///
    /// Accumulated floating-point error can leave the cumulative sum just
    /// below the drawn value; the last index is taken in that case.
    pub fn sample_index<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.gen();
        let mut cumulative = 0.0;

        for (index, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return index;
            }
        }
        self.dimension() - 1
    }

    /// Measure all qubits, collapsing the state to the observed basis state.
    ///
    /// Entry `i` of the result is bit `i` of the sampled index (qubit 0 =
    /// least-significant bit).
    pub fn measure_all<R: Rng>(&mut self, rng: &mut R) -> Vec<bool> {
        let outcome = self.sample_index(rng);

        let bits: Vec<bool> = (0..self.num_qubits())
            .map(|i| (outcome >> i) & 1 == 1)
            .collect();

        let mut collapsed = StateVector::new(self.num_qubits());
        collapsed.amplitudes.swap(0, outcome);
        *self = collapsed;

        bits
    }

    /// Sample measurement counts over `shots` repetitions without collapsing.
    pub fn sample_counts<R: Rng>(&self, shots: usize, rng: &mut R) -> MeasurementStatistics {
        let n = self.num_qubits();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..shots {
            let outcome = self.sample_index(rng);
            let key: String = (0..n)
                .rev()
                .map(|i| if (outcome >> i) & 1 == 1 { '1' } else { '0' })
                .collect();
            *counts.entry(key).or_insert(0) += 1;
        }

        MeasurementStatistics { shots, counts }
    }
}

/// Measurement statistics from multiple shots.
///
/// Count keys are bitstrings printed most-significant qubit first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementStatistics {
    /// Number of shots
    pub shots: usize,
    /// Counts per outcome
    pub counts: HashMap<String, usize>,
}

impl MeasurementStatistics {
    /// Get probabilities from counts
    pub fn probabilities(&self) -> HashMap<String, f64> {
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / self.shots as f64))
            .collect()
    }

    /// Get most frequent outcome
    pub fn most_frequent(&self) -> Option<(&String, usize)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(s, &c)| (s, c))
    }

    /// Display as histogram
    pub fn histogram(&self, width: usize) -> String {
        let max_count = self.counts.values().max().copied().unwrap_or(1);
        let mut sorted: Vec<_> = self.counts.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        let mut lines = Vec::new();
        for (outcome, &count) in sorted {
            let bar_len = (count as f64 / max_count as f64 * width as f64) as usize;
            let bar = "█".repeat(bar_len);
            let prob = count as f64 / self.shots as f64;
            lines.push(format!("{}: {} {:.2}% ({})", outcome, bar, prob * 100.0, count));
        }

        lines.join("\n")
    }
}

//! Backward algorithm (sum-product, time descending).
//!
//! Layer `k` of this recursion is time step `T - k`; [`Recurrence::finish`]
//! flips the frontiers back into time order.

use crate::model::Hmm;
use crate::table::Table;
use crate::traits::Recurrence;

/// Result of the backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Backward {
    /// `beta[(t, i)]` = P(o_{t+1}..o_T | state i at t, λ).
    pub beta: Table<f64>,
    /// `P(O | λ) = Σ_i π[i]·B[i][o_1]·β[1][i]`.
    pub probability: f64,
}

/// Backward recursion over validated, 0-based observations.
pub(crate) struct BackwardProblem<'a> {
    hmm: &'a Hmm,
    obs: &'a [usize],
}

impl<'a> BackwardProblem<'a> {
    pub(crate) fn new(hmm: &'a Hmm, obs: &'a [usize]) -> Self {
        Self { hmm, obs }
    }
}

impl Recurrence for BackwardProblem<'_> {
    type Frontier = Vec<f64>;
    type Output = Backward;

    fn num_layers(&self) -> usize {
        self.obs.len()
    }

    /// β at the last time step is 1 for every state.
    fn init_frontier(&self) -> Self::Frontier {
        vec![1.0; self.hmm.n_states()]
    }

    fn step(&self, layer: usize, beta_next: &Self::Frontier) -> Self::Frontier {
        // Producing time t (0-based) from t + 1, where t + 1 = T - 1 - layer.
        let sym_next = self.obs[self.obs.len() - 1 - layer];
        let n = self.hmm.n_states();
        (0..n)
            .map(|from| {
                beta_next
                    .iter()
                    .enumerate()
                    .map(|(to, &b)| self.hmm.a(from, to) * self.hmm.b(to, sym_next) * b)
                    .sum::<f64>()
            })
            .collect()
    }

    fn finish(&self, mut frontiers: Vec<Self::Frontier>) -> Self::Output {
        frontiers.reverse();
        let o0 = self.obs[0];
        let probability = frontiers
            .first()
            .map(|beta1| {
                beta1
                    .iter()
                    .enumerate()
                    .map(|(i, &b)| self.hmm.pi(i) * self.hmm.b(i, o0) * b)
                    .sum::<f64>()
            })
            .unwrap_or(0.0);
        Backward {
            beta: Table::from_rows(self.hmm.n_states(), frontiers),
            probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LatticeEngine;

    fn three_state() -> Hmm {
        Hmm::new(
            3,
            2,
            vec![
                vec![0.1, 0.6, 0.3],
                vec![0.3, 0.3, 0.4],
                vec![0.5, 0.25, 0.25],
            ],
            vec![vec![0.9, 0.1], vec![0.5, 0.5], vec![0.2, 0.8]],
            vec![0.3, 0.3, 0.4],
        )
        .unwrap()
    }

    #[test]
    fn boundary_is_one_for_every_state() {
        let hmm = three_state();
        let obs = [0, 1, 1, 0];
        let out = LatticeEngine::new(BackwardProblem::new(&hmm, &obs)).run();
        assert_eq!(out.beta.len(), 4);
        assert_eq!(out.beta.row(4), Some(&[1.0, 1.0, 1.0][..]));
    }

    #[test]
    fn single_step_probability_is_first_emission_mass() {
        let hmm = three_state();
        let obs = [1];
        let out = LatticeEngine::new(BackwardProblem::new(&hmm, &obs)).run();
        let expected = 0.3 * 0.1 + 0.3 * 0.5 + 0.4 * 0.8;
        assert!((out.probability - expected).abs() < 1e-15);
    }

    #[test]
    fn penultimate_row_marginalizes_last_symbol() {
        let hmm = three_state();
        let obs = [0, 1];
        let out = LatticeEngine::new(BackwardProblem::new(&hmm, &obs)).run();
        // beta1[i] = sum_j A[i][j] * B[j][1]
        let b = [0.1, 0.5, 0.8];
        for i in 0..3 {
            let expected: f64 = (0..3).map(|j| hmm.a(i, j) * b[j]).sum();
            assert!((out.beta[(1, i + 1)] - expected).abs() < 1e-15);
        }
    }
}

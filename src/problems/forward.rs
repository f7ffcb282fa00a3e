//! Forward algorithm (sum-product, time ascending).

use crate::model::Hmm;
use crate::table::Table;
use crate::traits::Recurrence;

/// Result of the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Forward {
    /// `alpha[(t, i)]` = P(o_1..o_t, state i at t | λ).
    pub alpha: Table<f64>,
    /// `P(O | λ) = Σ_i α[T][i]`.
    pub probability: f64,
}

/// Forward recursion over validated, 0-based observations.
pub(crate) struct ForwardProblem<'a> {
    hmm: &'a Hmm,
    obs: &'a [usize],
}

impl<'a> ForwardProblem<'a> {
    pub(crate) fn new(hmm: &'a Hmm, obs: &'a [usize]) -> Self {
        Self { hmm, obs }
    }
}

impl Recurrence for ForwardProblem<'_> {
    type Frontier = Vec<f64>;
    type Output = Forward;

    fn num_layers(&self) -> usize {
        self.obs.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let o0 = self.obs[0];
        (0..self.hmm.n_states())
            .map(|i| self.hmm.pi(i) * self.hmm.b(i, o0))
            .collect()
    }

    fn step(&self, layer: usize, alpha: &Self::Frontier) -> Self::Frontier {
        let sym = self.obs[layer + 1];
        let n = self.hmm.n_states();
        (0..n)
            .map(|to| {
                let inflow: f64 = alpha
                    .iter()
                    .enumerate()
                    .map(|(from, &a)| a * self.hmm.a(from, to))
                    .sum();
                inflow * self.hmm.b(to, sym)
            })
            .collect()
    }

    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output {
        let probability = frontiers
            .last()
            .map(|f| f.iter().sum::<f64>())
            .unwrap_or(0.0);
        Forward {
            alpha: Table::from_rows(self.hmm.n_states(), frontiers),
            probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LatticeEngine;

    fn sticky() -> Hmm {
        Hmm::new(
            2,
            2,
            vec![vec![0.7, 0.3], vec![0.4, 0.6]],
            vec![vec![0.9, 0.1], vec![0.2, 0.8]],
            vec![0.6, 0.4],
        )
        .unwrap()
    }

    #[test]
    fn init_frontier_uses_first_symbol() {
        let hmm = sticky();
        let obs = [1, 0];
        let f = ForwardProblem::new(&hmm, &obs).init_frontier();
        assert!((f[0] - 0.6 * 0.1).abs() < 1e-15);
        assert!((f[1] - 0.4 * 0.8).abs() < 1e-15);
    }

    #[test]
    fn two_step_hand_computation() {
        let hmm = sticky();
        let obs = [0, 1];
        let out = LatticeEngine::new(ForwardProblem::new(&hmm, &obs)).run();
        // alpha1 = [0.54, 0.08]
        // alpha2 = [(0.54*0.7 + 0.08*0.4)*0.1, (0.54*0.3 + 0.08*0.6)*0.8]
        let a2 = [(0.378 + 0.032) * 0.1, (0.162 + 0.048) * 0.8];
        assert!((out.alpha[(2, 1)] - a2[0]).abs() < 1e-12);
        assert!((out.alpha[(2, 2)] - a2[1]).abs() < 1e-12);
        assert!((out.probability - (a2[0] + a2[1])).abs() < 1e-12);
    }
}

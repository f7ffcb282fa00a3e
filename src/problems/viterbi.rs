//! Viterbi decoding (max-product with backpointers).
//!
//! Every argmax here starts from a `0.0` baseline with state 1 as the
//! default and only moves on a strictly greater candidate (see
//! [`argmax_first`]). Ties therefore resolve to the lowest-indexed state, and
//! a column whose candidates are all zero points at state 1.

use crate::model::Hmm;
use crate::table::Table;
use crate::traits::Recurrence;
use crate::utils::argmax_first;

/// Result of Viterbi decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Viterbi {
    /// Most probable state sequence; `path[k]` is the (1-based) state at
    /// time `k + 1`.
    pub path: Vec<usize>,
    /// `delta[(t, i)]`: probability of the best state sequence ending in
    /// state `i` at time `t`.
    pub delta: Table<f64>,
    /// `psi[(t, i)]`: 1-based predecessor at `t - 1` achieving
    /// `delta[(t, i)]`. Row 1 holds the sentinel `0`.
    pub psi: Table<usize>,
    /// `max_i delta[(T, i)]`, the joint probability of `path` and `O`.
    pub probability: f64,
}

/// One time step of the Viterbi lattice.
#[derive(Clone, Debug)]
pub(crate) struct ViterbiColumn {
    delta: Vec<f64>,
    /// 0-based predecessors; meaningless in the first column.
    psi: Vec<usize>,
}

/// Viterbi recursion over validated, 0-based observations.
pub(crate) struct ViterbiProblem<'a> {
    hmm: &'a Hmm,
    obs: &'a [usize],
}

impl<'a> ViterbiProblem<'a> {
    pub(crate) fn new(hmm: &'a Hmm, obs: &'a [usize]) -> Self {
        Self { hmm, obs }
    }
}

impl Recurrence for ViterbiProblem<'_> {
    type Frontier = ViterbiColumn;
    type Output = Viterbi;

    fn num_layers(&self) -> usize {
        self.obs.len()
    }

    fn init_frontier(&self) -> Self::Frontier {
        let n = self.hmm.n_states();
        let o0 = self.obs[0];
        ViterbiColumn {
            delta: (0..n).map(|i| self.hmm.pi(i) * self.hmm.b(i, o0)).collect(),
            psi: vec![0; n],
        }
    }

    fn step(&self, layer: usize, prev: &Self::Frontier) -> Self::Frontier {
        let sym = self.obs[layer + 1];
        let n = self.hmm.n_states();
        let mut delta = vec![0.0; n];
        let mut psi = vec![0; n];
        for (to, (d, p)) in delta.iter_mut().zip(psi.iter_mut()).enumerate() {
            let (best, arg) = argmax_first(
                prev.delta
                    .iter()
                    .enumerate()
                    .map(|(from, &v)| v * self.hmm.a(from, to)),
            );
            *d = best * self.hmm.b(to, sym);
            *p = arg;
        }
        ViterbiColumn { delta, psi }
    }

    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output {
        let n = self.hmm.n_states();
        let t_len = frontiers.len();

        // Termination.
        let (probability, last) = frontiers
            .last()
            .map(|col| argmax_first(col.delta.iter().copied()))
            .unwrap_or((0.0, 0));

        // Backtrack.
        let mut path = vec![0usize; t_len];
        if t_len > 0 {
            path[t_len - 1] = last;
            for t in (0..t_len - 1).rev() {
                path[t] = frontiers[t + 1].psi[path[t + 1]];
            }
        }

        let psi = Table::from_rows(
            n,
            frontiers.iter().enumerate().map(|(t, col)| {
                if t == 0 {
                    vec![0; n]
                } else {
                    col.psi.iter().map(|&s| s + 1).collect::<Vec<usize>>()
                }
            }),
        );
        let delta = Table::from_rows(n, frontiers.into_iter().map(|col| col.delta));

        Viterbi {
            path: path.into_iter().map(|s| s + 1).collect(),
            delta,
            psi,
            probability,
        }
    }
}

//! The HMM parameter model and its query entry points.

use crate::engine::LatticeEngine;
use crate::error::{HmmError, Result};
use crate::problems::backward::{Backward, BackwardProblem};
use crate::problems::forward::{Forward, ForwardProblem};
use crate::problems::viterbi::{Viterbi, ViterbiProblem};
use crate::table::Table;
use crate::utils::{first_invalid_probability, stochastic_sum, DEFAULT_TOLERANCE};

/// Discrete hidden Markov model with `N` states and `M` symbols.
///
/// States and symbols are numbered from 1 at the API boundary, matching the
/// usual `1..N` / `1..M` notation. Parameters are validated once at
/// construction and are immutable afterwards; every query returns fresh
/// owned tables, so one instance can serve any number of queries, including
/// concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Hmm {
    n_states: usize,
    n_symbols: usize,
    /// `transition[i][j]` = P(state j at t+1 | state i at t), 0-based.
    transition: Vec<Vec<f64>>,
    /// `emission[i][k]` = P(symbol k | state i), 0-based.
    emission: Vec<Vec<f64>>,
    /// `initial[i]` = P(state i at t = 1), 0-based.
    initial: Vec<f64>,
    tolerance: f64,
}

impl Hmm {
    /// Construct a model, checking rows against [`DEFAULT_TOLERANCE`].
    ///
    /// `transition` is N×N, `emission` is N×M and `initial` has length N.
    /// Row `r` of each matrix describes state `r + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`HmmError::Configuration`] if:
    /// - `n_states` or `n_symbols` is zero
    /// - any matrix or vector has the wrong shape
    /// - any entry is negative, greater than one, or not finite
    /// - any row of `transition`/`emission`, or `initial`, does not sum to 1
    pub fn new(
        n_states: usize,
        n_symbols: usize,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
        initial: Vec<f64>,
    ) -> Result<Self> {
        Self::with_tolerance(
            n_states,
            n_symbols,
            transition,
            emission,
            initial,
            DEFAULT_TOLERANCE,
        )
    }

    /// Like [`Hmm::new`], with an explicit tolerance for the row sums.
    pub fn with_tolerance(
        n_states: usize,
        n_symbols: usize,
        transition: Vec<Vec<f64>>,
        emission: Vec<Vec<f64>>,
        initial: Vec<f64>,
        tolerance: f64,
    ) -> Result<Self> {
        let model = Self {
            n_states,
            n_symbols,
            transition,
            emission,
            initial,
            tolerance,
        };
        model.validate().map_err(reject)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(n_states, n_symbols, tolerance, "constructed hmm");

        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let n = self.n_states;
        let m = self.n_symbols;
        let config = |msg: String| Err(HmmError::Configuration(msg));

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return config(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            ));
        }
        if n == 0 {
            return config("n_states must be > 0".into());
        }
        if m == 0 {
            return config("n_symbols must be > 0".into());
        }

        // Shapes.
        if self.transition.len() != n {
            return config(format!(
                "transition has {} rows, expected {n}",
                self.transition.len()
            ));
        }
        if let Some(r) = self.transition.iter().position(|row| row.len() != n) {
            return config(format!(
                "transition row {} has {} entries, expected {n}",
                r + 1,
                self.transition[r].len()
            ));
        }
        if self.emission.len() != n {
            return config(format!(
                "emission has {} rows, expected {n}",
                self.emission.len()
            ));
        }
        if let Some(r) = self.emission.iter().position(|row| row.len() != m) {
            return config(format!(
                "emission row {} has {} entries, expected {m}",
                r + 1,
                self.emission[r].len()
            ));
        }
        if self.initial.len() != n {
            return config(format!(
                "initial distribution has length {}, expected {n}",
                self.initial.len()
            ));
        }

        // Entry ranges.
        for (name, rows) in [("transition", &self.transition), ("emission", &self.emission)] {
            for (r, row) in rows.iter().enumerate() {
                if let Some(c) = first_invalid_probability(row) {
                    return config(format!(
                        "{name}[{}][{}] = {} is not a probability",
                        r + 1,
                        c + 1,
                        row[c]
                    ));
                }
            }
        }
        if let Some(c) = first_invalid_probability(&self.initial) {
            return config(format!(
                "initial[{}] = {} is not a probability",
                c + 1,
                self.initial[c]
            ));
        }

        // Row sums.
        for (name, rows) in [("transition", &self.transition), ("emission", &self.emission)] {
            for (r, row) in rows.iter().enumerate() {
                let (sum, ok) = stochastic_sum(row, self.tolerance);
                if !ok {
                    return config(format!(
                        "{name} row {} sums to {sum}, expected 1",
                        r + 1
                    ));
                }
            }
        }
        let (sum, ok) = stochastic_sum(&self.initial, self.tolerance);
        if !ok {
            return config(format!("initial distribution sums to {sum}, expected 1"));
        }

        Ok(())
    }

    /// Number of hidden states `N`.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of observable symbols `M`.
    pub fn n_symbols(&self) -> usize {
        self.n_symbols
    }

    /// Tolerance the row sums were checked against.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// `A[i][j]` for 1-based states `i`, `j`.
    pub fn transition(&self, i: usize, j: usize) -> Option<f64> {
        let row = self.transition.get(i.checked_sub(1)?)?;
        row.get(j.checked_sub(1)?).copied()
    }

    /// `B[i][k]` for 1-based state `i` and symbol `k`.
    pub fn emission(&self, i: usize, k: usize) -> Option<f64> {
        let row = self.emission.get(i.checked_sub(1)?)?;
        row.get(k.checked_sub(1)?).copied()
    }

    /// `π[i]` for 1-based state `i`.
    pub fn initial(&self, i: usize) -> Option<f64> {
        self.initial.get(i.checked_sub(1)?).copied()
    }

    // 0-based accessors for the recursions.

    #[inline]
    pub(crate) fn a(&self, from: usize, to: usize) -> f64 {
        self.transition[from][to]
    }

    #[inline]
    pub(crate) fn b(&self, state: usize, symbol: usize) -> f64 {
        self.emission[state][symbol]
    }

    #[inline]
    pub(crate) fn pi(&self, state: usize) -> f64 {
        self.initial[state]
    }

    /// Check `t` against `observations` and convert the first `t` symbols to
    /// 0-based indices.
    fn observation_indices(&self, t: usize, observations: &[usize]) -> Result<Vec<usize>> {
        if t == 0 {
            return Err(reject(HmmError::Range("T must be at least 1".into())));
        }
        if t > observations.len() {
            return Err(reject(HmmError::Range(format!(
                "T = {t} exceeds observation length {}",
                observations.len()
            ))));
        }
        observations[..t]
            .iter()
            .enumerate()
            .map(|(idx, &o)| {
                if o == 0 || o > self.n_symbols {
                    Err(reject(HmmError::Range(format!(
                        "observation[{}] = {o} outside 1..={}",
                        idx + 1,
                        self.n_symbols
                    ))))
                } else {
                    Ok(o - 1)
                }
            })
            .collect()
    }

    /// Forward algorithm over the first `t` observations.
    ///
    /// Returns the α table and `P(O | λ)`.
    ///
    /// # Errors
    ///
    /// [`HmmError::Range`] if `t == 0`, `t > observations.len()`, or any of
    /// the first `t` symbols lies outside `1..=M`.
    pub fn forward(&self, t: usize, observations: &[usize]) -> Result<Forward> {
        let obs = self.observation_indices(t, observations)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(t, n_states = self.n_states, "forward");
        Ok(LatticeEngine::new(ForwardProblem::new(self, &obs)).run())
    }

    /// Backward algorithm over the first `t` observations.
    ///
    /// Returns the β table and `P(O | λ)`, which agrees with
    /// [`forward`](Self::forward) up to rounding.
    ///
    /// # Errors
    ///
    /// Same as [`forward`](Self::forward).
    pub fn backward(&self, t: usize, observations: &[usize]) -> Result<Backward> {
        let obs = self.observation_indices(t, observations)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(t, n_states = self.n_states, "backward");
        Ok(LatticeEngine::new(BackwardProblem::new(self, &obs)).run())
    }

    /// Viterbi decoding over the first `t` observations.
    ///
    /// Returns the most probable state path (1-based states), its
    /// probability, and the δ/ψ tables. Ties go to the lowest-indexed state;
    /// when every candidate is zero the choice defaults to state 1.
    ///
    /// # Errors
    ///
    /// Same as [`forward`](Self::forward).
    pub fn viterbi(&self, t: usize, observations: &[usize]) -> Result<Viterbi> {
        let obs = self.observation_indices(t, observations)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(t, n_states = self.n_states, "viterbi");
        Ok(LatticeEngine::new(ViterbiProblem::new(self, &obs)).run())
    }

    /// Posterior state marginals `γ[t][i] = α[t][i]·β[t][i] / P(O | λ)`.
    ///
    /// # Errors
    ///
    /// [`HmmError::Range`] as for [`forward`](Self::forward), and
    /// [`HmmError::ZeroLikelihood`] when the sequence is impossible under
    /// the model.
    pub fn posteriors(&self, t: usize, observations: &[usize]) -> Result<Table<f64>> {
        let fwd = self.forward(t, observations)?;
        let bwd = self.backward(t, observations)?;
        if fwd.probability <= 0.0 {
            return Err(reject(HmmError::ZeroLikelihood));
        }
        let p = fwd.probability;
        let rows = fwd
            .alpha
            .rows()
            .zip(bwd.beta.rows())
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x * y / p).collect::<Vec<f64>>());
        Ok(Table::from_rows(self.n_states, rows))
    }
}

#[inline]
fn reject(err: HmmError) -> HmmError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "rejected input");
    err
}

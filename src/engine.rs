//! Generic driver for layered recursions.
//!
//! The engine evaluates a [`Recurrence`] layer by layer, keeps every
//! frontier, and hands them to [`Recurrence::finish`]. It holds no state
//! besides the problem, so a fresh engine per query is cheap.

use crate::traits::Recurrence;

/// Layer-by-layer driver for a recursion instance `P`.
///
/// Typical usage goes through [`Hmm`](crate::Hmm); driving a recursion
/// directly looks like this:
/// ```
/// use hmm_dp::{engine::LatticeEngine, traits::Recurrence};
///
/// struct Doubling(usize);
///
/// impl Recurrence for Doubling {
///     type Frontier = u64;
///     type Output = Vec<u64>;
///     fn num_layers(&self) -> usize { self.0 }
///     fn init_frontier(&self) -> u64 { 1 }
///     fn step(&self, _layer: usize, f: &u64) -> u64 { f * 2 }
///     fn finish(&self, frontiers: Vec<u64>) -> Vec<u64> { frontiers }
/// }
///
/// let out = LatticeEngine::new(Doubling(4)).run();
/// assert_eq!(out, vec![1, 2, 4, 8]);
/// ```
pub struct LatticeEngine<P: Recurrence> {
    problem: P,
}

impl<P: Recurrence> LatticeEngine<P> {
    /// Wrap a recursion instance.
    ///
    /// # Panics
    /// Panics if `problem.num_layers() == 0`.
    pub fn new(problem: P) -> Self {
        assert!(
            problem.num_layers() > 0,
            "a recursion needs at least one layer"
        );
        Self { problem }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Evaluate every layer and build the output.
    pub fn run(&self) -> P::Output {
        let layers = self.problem.num_layers();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("lattice_run", layers);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut frontiers = Vec::with_capacity(layers);
        let mut frontier = self.problem.init_frontier();
        for layer in 0..layers - 1 {
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("recurrence_step", layer);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            let next = self.problem.step(layer, &frontier);
            frontiers.push(std::mem::replace(&mut frontier, next));
        }
        frontiers.push(frontier);

        self.problem.finish(frontiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        t: usize,
    }

    impl Recurrence for Counting {
        type Frontier = Vec<usize>;
        type Output = Vec<Vec<usize>>;

        fn num_layers(&self) -> usize {
            self.t
        }
        fn init_frontier(&self) -> Self::Frontier {
            vec![0, 0]
        }
        fn step(&self, layer: usize, f: &Self::Frontier) -> Self::Frontier {
            vec![f[0] + 1, layer]
        }
        fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output {
            frontiers
        }
    }

    #[test]
    fn collects_one_frontier_per_layer() {
        let out = LatticeEngine::new(Counting { t: 4 }).run();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], vec![0, 0]);
        assert_eq!(out[3], vec![3, 2]);
    }

    #[test]
    fn single_layer_skips_steps() {
        let out = LatticeEngine::new(Counting { t: 1 }).run();
        assert_eq!(out, vec![vec![0, 0]]);
    }

    #[test]
    fn rerunning_is_deterministic() {
        let engine = LatticeEngine::new(Counting { t: 5 });
        assert_eq!(engine.run(), engine.run());
        assert_eq!(engine.problem().t, 5);
    }

    #[test]
    #[should_panic]
    fn new_panics_on_zero_layers() {
        let _ = LatticeEngine::new(Counting { t: 0 });
    }
}

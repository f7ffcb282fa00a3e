//! Core trait for layered recursions over an observation sequence.
//!
//! Forward, backward and Viterbi share one shape: a frontier holding one value
//! per hidden state is seeded at the first layer and rewritten once per
//! subsequent layer, using only the previous frontier and fixed model data.
//! Implement [`Recurrence`] for such a pass and let
//! [`LatticeEngine`](crate::engine::LatticeEngine) drive it.
//!
//! A layer is a position in evaluation order, not necessarily in time: the
//! backward pass visits time steps from last to first, so its layer `0` is
//! time step `T`.

/// A single-pass dynamic program over `num_layers()` layers.
///
/// Semantics:
/// - `init_frontier()` produces the frontier at layer 0.
/// - `step(layer, frontier)` maps layer `layer` to `layer + 1`, for
///   `layer` in `0..num_layers() - 1`.
/// - `finish(frontiers)` receives all `num_layers()` frontiers in layer
///   order and builds the caller-facing result.
pub trait Recurrence {
    /// Per-layer values (typically one entry per hidden state).
    type Frontier;

    /// Result handed back to the caller once every layer is evaluated.
    type Output;

    /// Number of layers `T`. Must be at least one.
    fn num_layers(&self) -> usize;

    /// Seed the frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// Perform one step: from layer `layer` to `layer + 1`.
    ///
    /// Must only depend on `frontier` and fixed problem data.
    fn step(&self, layer: usize, frontier: &Self::Frontier) -> Self::Frontier;

    /// Turn the full list of frontiers (layer order) into the output.
    fn finish(&self, frontiers: Vec<Self::Frontier>) -> Self::Output;
}

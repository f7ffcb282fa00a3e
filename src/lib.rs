//! Inference for discrete hidden Markov models (HMM-DP)
//!
//! This crate implements the three classic dynamic programs over a
//! discrete-state, discrete-symbol HMM λ = (A, B, π):
//!
//! - **Forward**: the α table and the sequence likelihood `P(O | λ)`.
//! - **Backward**: the β table and the same likelihood computed in reverse.
//! - **Viterbi**: the single most probable state path with its δ/ψ tables.
//!
//! ## Core idea
//! 1. Build an immutable [`Hmm`] (validated once, never mutated).
//! 2. Query it with a length `T` and an observation sequence `O`.
//! 3. Each query is a layered recursion (a [`Recurrence`]) driven by the
//!    [`LatticeEngine`], and returns fresh owned tables.
//!
//! States and symbols are numbered from 1 at the API boundary, as in the
//! usual `1..N` / `1..M` notation. [`Table`] accessors take 1-based time
//! steps and states, and decoded paths hold 1-based states.
//!
//! All arithmetic is in plain probability space. Very long sequences will
//! underflow to zero; that is a documented limitation, not an error.
//!
//! ## Quick start
//! ```
//! use hmm_dp::Hmm;
//!
//! let hmm = Hmm::new(
//!     3,
//!     2,
//!     vec![vec![0.5, 0.2, 0.3], vec![0.3, 0.5, 0.2], vec![0.2, 0.3, 0.5]],
//!     vec![vec![0.5, 0.5], vec![0.4, 0.6], vec![0.7, 0.3]],
//!     vec![0.2, 0.4, 0.4],
//! )
//! .unwrap();
//!
//! let obs = [1, 2, 1];
//! let fwd = hmm.forward(3, &obs).unwrap();
//! assert!((fwd.probability - 0.130218).abs() < 1e-9);
//!
//! let vit = hmm.viterbi(3, &obs).unwrap();
//! assert_eq!(vit.path, vec![3, 3, 3]);
//! assert!((vit.probability - 0.0147).abs() < 1e-9);
//! ```
//!
//! ## Features
//! - `tracing` (default): spans around every recursion and debug events for
//!   queries and rejected inputs.
//! - `parallel`: [`Hmm::forward_many`] and [`Hmm::viterbi_many`] fan out
//!   over rayon.

pub mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod model;
pub mod problems;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::HmmBuilder;
pub use crate::engine::LatticeEngine;
pub use crate::error::{HmmError, Result};
pub use crate::model::Hmm;
pub use crate::problems::{backward::Backward, forward::Forward, viterbi::Viterbi};
pub use crate::table::Table;
pub use crate::traits::Recurrence;
pub use crate::utils::DEFAULT_TOLERANCE;

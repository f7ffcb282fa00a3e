//! The three inference recursions, each an implementation of
//! [`Recurrence`](crate::traits::Recurrence):
//! - [`forward`]  : sequence likelihood, α table.
//! - [`backward`] : time-reversed likelihood, β table.
//! - [`viterbi`]  : most probable state path, δ/ψ tables.

pub mod backward;
pub mod forward;
pub mod viterbi;

//! Many independent queries against one model.
//!
//! The model is immutable, so queries need no coordination. With the
//! `parallel` feature they fan out over rayon's global pool; otherwise they
//! run in order on the calling thread. Output order always matches input
//! order.

use crate::error::Result;
use crate::model::Hmm;
use crate::problems::forward::Forward;
use crate::problems::viterbi::Viterbi;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Hmm {
    /// Run [`Hmm::forward`] on every sequence, using its full length as `T`.
    pub fn forward_many<S>(&self, sequences: &[S]) -> Vec<Result<Forward>>
    where
        S: AsRef<[usize]> + Sync,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(queries = sequences.len(), "forward_many");
        map_queries(sequences, |obs| self.forward(obs.len(), obs))
    }

    /// Run [`Hmm::viterbi`] on every sequence, using its full length as `T`.
    pub fn viterbi_many<S>(&self, sequences: &[S]) -> Vec<Result<Viterbi>>
    where
        S: AsRef<[usize]> + Sync,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(queries = sequences.len(), "viterbi_many");
        map_queries(sequences, |obs| self.viterbi(obs.len(), obs))
    }
}

#[cfg(feature = "parallel")]
fn map_queries<S, R, F>(sequences: &[S], query: F) -> Vec<R>
where
    S: AsRef<[usize]> + Sync,
    R: Send,
    F: Fn(&[usize]) -> R + Sync,
{
    sequences.par_iter().map(|s| query(s.as_ref())).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_queries<S, R, F>(sequences: &[S], query: F) -> Vec<R>
where
    S: AsRef<[usize]> + Sync,
    F: Fn(&[usize]) -> R,
{
    sequences.iter().map(|s| query(s.as_ref())).collect()
}

//! Error taxonomy for model construction and inference queries.

use thiserror::Error;

/// Errors raised by [`Hmm`](crate::Hmm) construction and queries.
///
/// None of these are recoverable locally: the inputs have to be fixed by the
/// caller. Probabilities are never clamped or renormalized to hide them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// Malformed or non-stochastic parameters, detected at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Observation symbol outside `1..=M`, or `T` inconsistent with the
    /// observation sequence, detected at query time.
    #[error("range error: {0}")]
    Range(String),

    /// The observation sequence has probability zero under the model, so
    /// quantities normalized by that probability are undefined.
    #[error("observation sequence has zero likelihood under the model")]
    ZeroLikelihood,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;

#[cfg(test)]
mod tests {
    use super::HmmError;

    #[test]
    fn messages_name_the_category() {
        let e = HmmError::Configuration("transition row 2 sums to 0.9".into());
        assert_eq!(
            e.to_string(),
            "configuration error: transition row 2 sums to 0.9"
        );
        let e = HmmError::Range("observation[1] = 0".into());
        assert!(e.to_string().starts_with("range error:"));
    }
}

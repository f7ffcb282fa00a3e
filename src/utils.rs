//! Assorted numeric helpers shared by the model and the recursions.

/// Tolerance used for row-sum checks unless the caller picks another one.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Scan `values` for the maximum, starting from a `0.0` baseline with
/// index `0` as the default.
///
/// The running best is replaced only on a strictly greater value, so the
/// lowest index wins ties and an all-zero (or empty) input yields `(0.0, 0)`.
/// Indices are 0-based.
#[inline]
pub fn argmax_first<I>(values: I) -> (f64, usize)
where
    I: IntoIterator<Item = f64>,
{
    let mut best = 0.0;
    let mut best_idx = 0;
    for (idx, v) in values.into_iter().enumerate() {
        if v > best {
            best = v;
            best_idx = idx;
        }
    }
    (best, best_idx)
}

/// Check that every entry of `row` is a finite probability in `[0, 1]`.
///
/// Returns the 0-based index of the first offending entry.
pub fn first_invalid_probability(row: &[f64]) -> Option<usize> {
    row.iter()
        .position(|&p| !p.is_finite() || !(0.0..=1.0).contains(&p))
}

/// Sum of `row`, and whether it lies within `tol` of one.
#[inline]
pub fn stochastic_sum(row: &[f64], tol: f64) -> (f64, bool) {
    let sum: f64 = row.iter().sum();
    (sum, (sum - 1.0).abs() <= tol)
}

/// Relative comparison for probabilities that may be tiny.
///
/// Two exact zeros compare equal.
#[inline]
pub fn approx_eq_rel(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_keeps_first_of_ties() {
        assert_eq!(argmax_first([0.2, 0.5, 0.5, 0.1]), (0.5, 1));
    }

    #[test]
    fn argmax_defaults_to_first_on_zeros() {
        assert_eq!(argmax_first([0.0, 0.0, 0.0]), (0.0, 0));
        assert_eq!(argmax_first(std::iter::empty()), (0.0, 0));
    }

    #[test]
    fn argmax_picks_strict_maximum() {
        assert_eq!(argmax_first([0.0, 0.1, 0.3]), (0.3, 2));
    }

    #[test]
    fn invalid_probabilities_are_located() {
        assert_eq!(first_invalid_probability(&[0.5, 0.5]), None);
        assert_eq!(first_invalid_probability(&[0.5, -0.1]), Some(1));
        assert_eq!(first_invalid_probability(&[1.2, 0.0]), Some(0));
        assert_eq!(first_invalid_probability(&[f64::NAN]), Some(0));
    }

    #[test]
    fn stochastic_sum_respects_tolerance() {
        assert!(stochastic_sum(&[0.2, 0.3, 0.5], DEFAULT_TOLERANCE).1);
        let (sum, ok) = stochastic_sum(&[0.5, 0.4], DEFAULT_TOLERANCE);
        assert!(!ok);
        assert!((sum - 0.9).abs() < 1e-12);
    }

    #[test]
    fn relative_comparison() {
        assert!(approx_eq_rel(0.0, 0.0, 1e-9));
        assert!(approx_eq_rel(1e-300, 1e-300 * (1.0 + 1e-12), 1e-9));
        assert!(!approx_eq_rel(1.0, 1.001, 1e-9));
    }
}

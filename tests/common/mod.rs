#![allow(dead_code)]

use hmm_dp::Hmm;
use proptest::prelude::*;

/// Strictly positive row normalized to sum to one.
pub fn stochastic_row(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.05f64..1.0, len).prop_map(|w| {
        let s: f64 = w.iter().sum();
        w.into_iter().map(|x| x / s).collect()
    })
}

/// Random model with up to `max_n` states and `max_m` symbols, plus a
/// 1-based observation sequence of length `1..max_t`.
pub fn model_and_obs(
    max_n: usize,
    max_m: usize,
    max_t: usize,
) -> impl Strategy<Value = (Hmm, Vec<usize>)> {
    (1..=max_n, 1..=max_m, 1..max_t)
        .prop_flat_map(|(n, m, t)| {
            (
                prop::collection::vec(stochastic_row(n), n),
                prop::collection::vec(stochastic_row(m), n),
                stochastic_row(n),
                prop::collection::vec(1..=m, t),
            )
        })
        .prop_map(|(a, b, pi, obs)| {
            let n = pi.len();
            let m = b[0].len();
            (Hmm::new(n, m, a, b, pi).expect("normalized rows"), obs)
        })
}

/// Joint probability of a 1-based state path and the observations,
/// multiplied left to right.
pub fn path_probability(hmm: &Hmm, path: &[usize], obs: &[usize]) -> f64 {
    let mut p = hmm.initial(path[0]).unwrap() * hmm.emission(path[0], obs[0]).unwrap();
    for t in 1..path.len() {
        p = p * hmm.transition(path[t - 1], path[t]).unwrap()
            * hmm.emission(path[t], obs[t]).unwrap();
    }
    p
}

/// Sum and maximum of the joint probability over all `N^T` state paths.
pub fn full_enumeration(hmm: &Hmm, obs: &[usize]) -> (f64, f64) {
    let n = hmm.n_states();
    let t = obs.len();
    let mut path = vec![1usize; t];
    let mut total = 0.0;
    let mut best = 0.0f64;
    loop {
        let p = path_probability(hmm, &path, obs);
        total += p;
        best = best.max(p);

        // Odometer increment over 1..=n.
        let mut k = t;
        loop {
            if k == 0 {
                return (total, best);
            }
            k -= 1;
            if path[k] < n {
                path[k] += 1;
                break;
            }
            path[k] = 1;
        }
    }
}

pub fn rel_close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs())
}

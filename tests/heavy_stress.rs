#![cfg(feature = "heavy")]
use hmm_dp::Hmm;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_row(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let w: Vec<f64> = (0..len).map(|_| rng.gen_range(0.05..1.0)).collect();
    let s: f64 = w.iter().sum();
    w.into_iter().map(|x| x / s).collect()
}

#[test]
fn heavy_stress_wide_model() {
    let mut rng = StdRng::seed_from_u64(123);
    let n = 64;
    let m = 16;
    let a = (0..n).map(|_| random_row(&mut rng, n)).collect();
    let b = (0..n).map(|_| random_row(&mut rng, m)).collect();
    let pi = random_row(&mut rng, n);
    let hmm = Hmm::new(n, m, a, b, pi).unwrap();

    // Short enough to stay clear of underflow.
    let obs: Vec<usize> = (0..100).map(|_| rng.gen_range(1..=m)).collect();
    let fwd = hmm.forward(obs.len(), &obs).unwrap();
    let bwd = hmm.backward(obs.len(), &obs).unwrap();
    let vit = hmm.viterbi(obs.len(), &obs).unwrap();
    assert!(fwd.probability > 0.0);
    assert!((fwd.probability - bwd.probability).abs() <= 1e-9 * fwd.probability);
    assert_eq!(vit.path.len(), obs.len());
    assert!(vit.probability <= fwd.probability);
}

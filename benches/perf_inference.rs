use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use hmm_dp::Hmm;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_obs(rng: &mut StdRng, len: usize, vocab: usize) -> Vec<usize> {
    (0..len).map(|_| rng.gen_range(1..=vocab)).collect()
}

fn demo_hmm() -> Hmm {
    Hmm::new(
        3,
        2,
        vec![
            vec![0.5, 0.2, 0.3],
            vec![0.3, 0.5, 0.2],
            vec![0.2, 0.3, 0.5],
        ],
        vec![vec![0.5, 0.5], vec![0.4, 0.6], vec![0.7, 0.3]],
        vec![0.2, 0.4, 0.4],
    )
    .expect("demo model is stochastic")
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        p.memory()
    } else {
        0
    }
}

fn bench_inference(c: &mut Criterion) {
    let hmm = demo_hmm();
    let mut group = c.benchmark_group("hmm_inference");
    for &len in &[64usize, 256, 1024] {
        group.bench_function(format!("forward_len_{len}"), |b| {
            b.iter_batched(
                || random_obs(&mut StdRng::seed_from_u64(44), len, 2),
                |obs| criterion::black_box(hmm.forward(len, &obs).unwrap().probability),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("backward_len_{len}"), |b| {
            b.iter_batched(
                || random_obs(&mut StdRng::seed_from_u64(44), len, 2),
                |obs| criterion::black_box(hmm.backward(len, &obs).unwrap().probability),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("viterbi_len_{len}"), |b| {
            b.iter_batched(
                || random_obs(&mut StdRng::seed_from_u64(44), len, 2),
                |obs| {
                    let before = rss_kib();
                    let out = hmm.viterbi(len, &obs).unwrap();
                    let after = rss_kib();
                    criterion::black_box(out.path);
                    eprintln!(
                        "RSS KiB delta (viterbi {len}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inference);
criterion_main!(benches);

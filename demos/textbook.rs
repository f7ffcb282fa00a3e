//! Example: the three-state, two-symbol textbook model.
//!
//! Run with:
//! `cargo run --example textbook -- [forward|backward|viterbi]`

use hmm_dp::Hmm;
use std::env;
use std::process;

fn main() {
    // States 1..=3, symbols 1..=2.
    let hmm = match Hmm::new(
        3,
        2,
        vec![
            vec![0.5, 0.2, 0.3],
            vec![0.3, 0.5, 0.2],
            vec![0.2, 0.3, 0.5],
        ],
        vec![vec![0.5, 0.5], vec![0.4, 0.6], vec![0.7, 0.3]],
        vec![0.2, 0.4, 0.4],
    ) {
        Ok(hmm) => hmm,
        Err(err) => {
            eprintln!("textbook: {err}");
            process::exit(1);
        }
    };

    let obs = [1, 2, 1];
    let t = obs.len();
    let which = env::args().nth(1).unwrap_or_else(|| "viterbi".to_string());

    let outcome = match which.as_str() {
        "forward" => hmm.forward(t, &obs).map(|f| {
            println!("alpha:\n{}", f.alpha);
            println!("P(O | model) = {}", f.probability);
        }),
        "backward" => hmm.backward(t, &obs).map(|b| {
            println!("beta:\n{}", b.beta);
            println!("P(O | model) = {}", b.probability);
        }),
        "viterbi" => hmm.viterbi(t, &obs).map(|v| {
            println!("delta:\n{}", v.delta);
            println!("psi:\n{}", v.psi);
            println!("P* = {}", v.probability);
            let path: Vec<String> = v.path.iter().map(|s| s.to_string()).collect();
            println!("path: {}", path.join(" "));
        }),
        other => {
            eprintln!("textbook: unknown algorithm '{other}' (forward|backward|viterbi)");
            process::exit(2);
        }
    };

    if let Err(err) = outcome {
        eprintln!("textbook: {err}");
        process::exit(1);
    }
}

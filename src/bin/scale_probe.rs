use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use hmm_dp::utils::approx_eq_rel;
use hmm_dp::Hmm;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const LENGTHS: &[usize] = &[16, 64, 256, 512, 1024, 2048, 4096, 8192];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let hmm = match demo_hmm() {
        Ok(hmm) => hmm,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            std::process::exit(1);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("HMM Scaling Probe: forward / backward / Viterbi");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Runs each algorithm on the 3-state textbook model over growing T and checks:");
    eprintln!("  • forward:  likelihood matches the backward pass (up to T = {})", options.verify_limit);
    eprintln!("  • backward: likelihood matches the forward pass");
    eprintln!("  • viterbi:  decoded path's joint probability equals the reported maximum");
    eprintln!();
    eprintln!("Probabilities are not rescaled, so long sequences underflow to 0.");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Forward algorithm...");
    measurements.extend(run_scenario(&hmm, Algorithm::Forward, &options, &mut sys));
    eprintln!();
    eprintln!("[2/3] Backward algorithm...");
    measurements.extend(run_scenario(&hmm, Algorithm::Backward, &options, &mut sys));
    eprintln!();
    eprintln!("[3/3] Viterbi decoding...");
    measurements.extend(run_scenario(&hmm, Algorithm::Viterbi, &options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 512usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value: String = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Maximum sequence length to cross-check (default: 512)
  -h, --help                    Print this help message

Examples:
  cargo run --bin scale_probe
  cargo run --bin scale_probe -- --format table --verify-limit 256
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Copy, Clone)]
enum Algorithm {
    Forward,
    Backward,
    Viterbi,
}

impl Algorithm {
    fn label(self) -> &'static str {
        match self {
            Algorithm::Forward => "forward",
            Algorithm::Backward => "backward",
            Algorithm::Viterbi => "viterbi",
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    probability: f64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_scenario(
    hmm: &Hmm,
    algorithm: Algorithm,
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] T = {}... ", idx + 1, total, len);
            let obs = alternating_observations(len);
            let m = measure(algorithm.label(), format!("obs_len={len}"), sys, || {
                run_once(hmm, algorithm, &obs, len <= options.verify_limit)
            });
            eprintln!(
                "{} P={:.6e}, time={:.3}s, status={}",
                m.verification_status.icon(),
                m.probability,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

/// Run one query; returns the probability and the verification outcome.
fn run_once(
    hmm: &Hmm,
    algorithm: Algorithm,
    obs: &[usize],
    verify: bool,
) -> (f64, VerificationStatus, Option<String>) {
    let t = obs.len();
    let (probability, cross_check) = match algorithm {
        Algorithm::Forward => {
            let p = hmm.forward(t, obs).map(|f| f.probability);
            (p, CrossCheck::Backward)
        }
        Algorithm::Backward => {
            let p = hmm.backward(t, obs).map(|b| b.probability);
            (p, CrossCheck::Forward)
        }
        Algorithm::Viterbi => match hmm.viterbi(t, obs) {
            Ok(v) => {
                let joint = path_probability(hmm, &v.path, obs);
                (Ok(v.probability), CrossCheck::Value(joint))
            }
            Err(err) => (Err(err), CrossCheck::Value(0.0)),
        },
    };

    let probability = match probability {
        Ok(p) => p,
        Err(err) => return (f64::NAN, VerificationStatus::Failed, Some(err.to_string())),
    };
    if !verify {
        return (probability, VerificationStatus::NotChecked, None);
    }

    let baseline = match cross_check {
        CrossCheck::Forward => hmm.forward(t, obs).map(|f| f.probability),
        CrossCheck::Backward => hmm.backward(t, obs).map(|b| b.probability),
        CrossCheck::Value(v) => Ok(v),
    };
    match baseline {
        Ok(b) if approx_eq_rel(b, probability, 1e-9) => {
            (probability, VerificationStatus::Passed, None)
        }
        Ok(b) => (
            probability,
            VerificationStatus::Failed,
            Some(format!("expected {b:.6e}, got {probability:.6e}")),
        ),
        Err(err) => (probability, VerificationStatus::Failed, Some(err.to_string())),
    }
}

enum CrossCheck {
    Forward,
    Backward,
    Value(f64),
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Test Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1);
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total as f64);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total as f64);
    eprintln!(
        "  ○ Not checked (T > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total as f64
    );
    eprintln!();

    if failed > 0 {
        eprintln!("Failed runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }

    eprintln!("Performance Statistics by Algorithm:");
    eprintln!();
    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let min_time = ms.iter().map(|m| m.wall_s).fold(f64::INFINITY, f64::min);
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let avg_time = ms.iter().map(|m| m.wall_s).sum::<f64>() / ms.len() as f64;
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        let underflowed = ms.iter().filter(|m| m.probability == 0.0).count();

        eprintln!("  {}:", scenario);
        eprintln!("    Runs: {}", ms.len());
        eprintln!("    Time: min={:.3}s, max={:.3}s, avg={:.3}s", min_time, max_time, avg_time);
        eprintln!("    Memory: max_delta={} KiB", max_mem);
        eprintln!("    Underflowed to zero: {}", underflowed);
        eprintln!();
    }

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All verified runs passed.");
    } else {
        eprintln!("✗ {} run(s) failed. Please review the errors above.", failed);
    }
    eprintln!("  • Time should grow linearly in T (O(T·N²) per query)");
    eprintln!("  • Memory grows linearly in T (full T×N tables are returned)");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(scenario: &'static str, size_desc: String, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> (f64, VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (probability, status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        probability,
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,rss_delta_kib,probability,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{:e},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.probability,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>12}  {:>14}  {:>14}  {:>12}  {}",
        "scenario", "size", "wall_s", "rss_delta_kib", "probability", "status", "detail",
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<12}  {:-<14}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>12.3}  {:>14}  {:>14.6e}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.probability,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        let probability = if m.probability.is_finite() {
            format!("{:e}", m.probability)
        } else {
            "null".to_string()
        };
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.3},\"rss_delta_kib\":{},\"probability\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            probability,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

fn alternating_observations(len: usize) -> Vec<usize> {
    (0..len).map(|i| i % 2 + 1).collect()
}

fn path_probability(hmm: &Hmm, path: &[usize], obs: &[usize]) -> f64 {
    let emit = |s: usize, o: usize| hmm.emission(s, o).unwrap_or(0.0);
    let mut p = hmm.initial(path[0]).unwrap_or(0.0) * emit(path[0], obs[0]);
    for t in 1..path.len() {
        p = p * hmm.transition(path[t - 1], path[t]).unwrap_or(0.0) * emit(path[t], obs[t]);
    }
    p
}

fn demo_hmm() -> hmm_dp::Result<Hmm> {
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
}

//! Running a solver once (timed) or repeatedly (benchmarked)

use crate::alloc_counter::AllocStats;
use crate::module::SolverEntry;
use crate::result::{BenchStats, Outcome, SolveResult, Timing};
use aoc_calendar::{Date, Year};
use std::time::{Duration, Instant};

/// Tuning for the adaptive benchmark loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Stop once a round takes at least this long
    pub target: Duration,
    /// Upper bound on iterations in a single round
    pub max_iterations: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            target: Duration::from_secs(1),
            max_iterations: 1_000_000_000,
        }
    }
}

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Invoke once and record wall-clock time
    Timed,
    /// Invoke repeatedly until the measurement is stable
    Benchmark(BenchConfig),
}

/// Run one solver against `input`
///
/// Solver failures are captured in the result's [`Outcome`], never returned
/// as errors. A benchmark stops at the first failing invocation.
pub fn run_solver(year: Year, entry: &SolverEntry<'_>, input: &str, mode: &Mode) -> SolveResult {
    let (outcome, timing) = match mode {
        Mode::Timed => {
            let start = Instant::now();
            let result = entry.solve(input);
            (Outcome::from(result), Timing::Elapsed(start.elapsed()))
        }
        Mode::Benchmark(config) => benchmark(entry, input, config),
    };

    SolveResult {
        date: Date::new(year, entry.day()),
        part: entry.part(),
        outcome,
        timing,
    }
}

/// One batch of back-to-back invocations
struct Round {
    iterations: u64,
    elapsed: Duration,
    allocs: AllocStats,
    last: Result<String, String>,
}

impl Round {
    fn stats(&self) -> BenchStats {
        let n = self.iterations.max(1);
        BenchStats {
            iterations: self.iterations,
            ns_per_op: (self.elapsed.as_nanos() / u128::from(n)) as u64,
            bytes_per_op: self.allocs.bytes / n,
            allocs_per_op: self.allocs.allocations / n,
        }
    }
}

fn run_round(entry: &SolverEntry<'_>, input: &str, n: u64) -> Round {
    let allocs_before = entry.alloc_stats();
    let start = Instant::now();

    let mut iterations = 0;
    let mut last = Ok(String::new());
    while iterations < n {
        iterations += 1;
        last = entry.solve(input);
        if last.is_err() {
            break;
        }
    }

    let elapsed = start.elapsed();
    Round {
        iterations,
        elapsed,
        allocs: entry.alloc_stats().since(allocs_before),
        last,
    }
}

fn benchmark(entry: &SolverEntry<'_>, input: &str, config: &BenchConfig) -> (Outcome, Timing) {
    let mut n = 1;
    let mut round = run_round(entry, input, n);

    while round.last.is_ok() && round.elapsed < config.target && n < config.max_iterations {
        n = next_iterations(n, round.elapsed, config);
        round = run_round(entry, input, n);
    }

    let stats = round.stats();
    (Outcome::from(round.last), Timing::Benchmark(stats))
}

/// Predict how many iterations reach the target from the previous round
///
/// Aims 20% past the target, grows at most 100x and at least by one.
fn next_iterations(last: u64, elapsed: Duration, config: &BenchConfig) -> u64 {
    let last = u128::from(last);
    let prev_ns = elapsed.as_nanos().max(1);

    let mut n = config.target.as_nanos().saturating_mul(last) / prev_ns;
    n += n / 5;
    n = n.min(last.saturating_mul(100));
    n = n.max(last + 1);
    n.min(u128::from(config.max_iterations)) as u64
}

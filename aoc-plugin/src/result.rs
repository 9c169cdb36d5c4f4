//! Per-invocation results and their report lines

use aoc_calendar::{Date, Part};
use std::fmt;
use std::time::Duration;

/// What a solver returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answer(String),
    Failure(String),
}

impl From<Result<String, String>> for Outcome {
    fn from(result: Result<String, String>) -> Self {
        match result {
            Ok(answer) => Outcome::Answer(answer),
            Err(message) => Outcome::Failure(message),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Answer(answer) => f.write_str(answer),
            Outcome::Failure(message) => write!(f, "[ERROR] {}", message),
        }
    }
}

/// Measurements of the final benchmark round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchStats {
    pub iterations: u64,
    pub ns_per_op: u64,
    pub bytes_per_op: u64,
    pub allocs_per_op: u64,
}

/// How long a solver took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Elapsed(Duration),
    Benchmark(BenchStats),
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timing::Elapsed(elapsed) => f.write_str(&format_duration(*elapsed)),
            Timing::Benchmark(b) => write!(
                f,
                "N={}, {} ns/op, {} bytes/op, {} allocs/op",
                b.iterations, b.ns_per_op, b.bytes_per_op, b.allocs_per_op
            ),
        }
    }
}

/// Result of running one part of one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub date: Date,
    pub part: Part,
    pub outcome: Outcome,
    pub timing: Timing,
}

/// Renders `Day <day> <part> (<timing>):` followed by the answer on the next line
impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} {} ({}):\n{}",
            self.date.day, self.part, self.timing, self.outcome
        )
    }
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

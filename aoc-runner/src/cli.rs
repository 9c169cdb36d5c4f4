//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Advent of Code solver runner
///
/// Builds `<cwd>/<year>` into a shared library, picks the latest (or the
/// requested) day exporting solvers, fetches the puzzle input and runs both
/// parts.
#[derive(Parser, Debug)]
#[command(name = "aoc-run", about = "Build and run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (latest year with a workspace directory if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (latest day exporting a part A solver if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Benchmark the solvers instead of timing a single run
    #[arg(short, long)]
    pub benchmark: bool,

    /// Target duration of one benchmark round
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
    pub bench_time: Duration,

    /// Cache directory for puzzle inputs and builds
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Print the unlock instants of a date range (YYYY-DD:YYYY-DD) and exit
    #[arg(long, value_name = "RANGE")]
    pub dates: Option<String>,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

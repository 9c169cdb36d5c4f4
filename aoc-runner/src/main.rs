//! AOC runner - build a year of solutions and run its latest solvers

mod cache;
mod cli;
mod compile;
mod config;
mod error;
mod loader;
mod output;
mod runner;
mod telemetry;
mod workspace;

use aoc_calendar::{CalendarError, parse_date_range};
use clap::Parser;
use cli::Args;
use config::Config;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    telemetry::init_telemetry(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Listing a date range needs no workspace
    if let Some(range) = &args.dates {
        let range = parse_date_range(range).map_err(CalendarError::from)?;
        OutputFormatter::new(args.quiet).write_instants(&mut out, range)?;
        return Ok(());
    }

    let config = Config::from_args(args)?;
    runner::run(&config, &mut out)
}

//! The resolve, build, discover, fetch and execute pipeline

use crate::cache::InputCache;
use crate::compile::build_year;
use crate::config::{self, Config};
use crate::error::{CliError, InputError};
use crate::loader::LibraryModule;
use crate::output::OutputFormatter;
use crate::workspace::find_year_directory;
use aoc_calendar::{Date, Year};
use aoc_http_client::AocClient;
use aoc_plugin::{Discovered, Mode, SolveResult, Strategy, find_solvers, run_solver};
use std::io::Write;
use tracing::info;
use zeroize::Zeroizing;

/// Run the selected day of the selected year and write its report to `out`
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<(), CliError> {
    let (year, dir) = find_year_directory(&config.workspace, config.year.into())?;
    info!(%year, dir = %dir.display(), "using workspace");

    let artifact = build_year(&dir, &config.dirs.build_dir(year))?;
    let module = LibraryModule::open(&artifact)?;

    let strategy = config.day.map_or(Strategy::Latest, Strategy::Specific);
    let found = find_solvers(&module, strategy)?;
    let date = Date::new(year, found.day);
    info!(%date, library = %module.path().display(), parts = found.entries().count(), "solvers found");

    let input = load_input(config, date)?;

    let formatter = OutputFormatter::new(config.quiet);
    formatter.write_header(out, year)?;
    for result in solve_day(year, &found, &input, &config.mode) {
        formatter.write_result(out, &result)?;
    }
    Ok(())
}

/// Puzzle input for `date` as text, asking for a session only on a cache miss
fn load_input(config: &Config, date: Date) -> Result<String, CliError> {
    let cache = InputCache::new(config.dirs.inputs_dir(), AocClient::new()?);

    let session = if cache.contains(date) {
        Zeroizing::new(String::new())
    } else {
        config::resolve_session(&config.dirs, date)?
    };

    let bytes = cache.get_input(date, &session)?;
    String::from_utf8(bytes).map_err(|_| InputError::Encoding { date }.into())
}

/// Run every discovered part in order, lazily
///
/// A failing part is reported in its result and never stops the next one.
pub fn solve_day<'a>(
    year: Year,
    found: &'a Discovered<'_>,
    input: &'a str,
    mode: &'a Mode,
) -> impl Iterator<Item = SolveResult> + 'a {
    found
        .entries()
        .map(move |entry| run_solver(year, entry, input, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_calendar::{Day, Part};
    use aoc_plugin::{Lookup, Outcome, SolverModule, Timing};

    /// Day 6 with a failing part A and a working part B
    struct SplitModule;

    impl SolverModule for SplitModule {
        fn lookup(&self, day: Day, part: Part) -> Lookup<'_> {
            match (day.get(), part) {
                (6, Part::A) => Lookup::Found(Box::new(|_: &str| Err::<String, _>("parse error".to_string()))),
                (6, Part::B) => Lookup::Found(Box::new(|input: &str| Ok::<_, String>(input.trim().len().to_string()))),
                _ => Lookup::Absent,
            }
        }
    }

    #[test]
    fn test_failure_does_not_stop_sibling_part() {
        let found = find_solvers(&SplitModule, Strategy::Latest).unwrap();
        let year = Year::new(2015).unwrap();

        let results: Vec<SolveResult> = solve_day(year, &found, "abcd\n", &Mode::Timed).collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].outcome, Outcome::Failure("parse error".to_string()));
        assert_eq!(results[1].outcome, Outcome::Answer("4".to_string()));
        assert_eq!(results[1].part, Part::B);
        assert_eq!(results[1].date, Date::new(year, Day::new(6).unwrap()));
        assert!(matches!(results[0].timing, Timing::Elapsed(_)));
    }

    #[test]
    fn test_report_for_discovered_day() {
        let found = find_solvers(&SplitModule, Strategy::Specific(Day::new(6).unwrap())).unwrap();
        let year = Year::new(2015).unwrap();
        let formatter = OutputFormatter::new(true);

        let mut out = Vec::new();
        formatter.write_header(&mut out, year).unwrap();
        for result in solve_day(year, &found, "xy", &Mode::Timed) {
            formatter.write_result(&mut out, &result).unwrap();
        }

        assert_eq!(String::from_utf8(out).unwrap(), "[ERROR] parse error\n2\n");
    }
}

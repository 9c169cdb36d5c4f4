//! Output formatting for solver results

use aoc_calendar::{Date, DateRange, Year};
use aoc_plugin::SolveResult;
use std::io::{self, Write};

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// `AOC <year>` banner preceding the results
    pub fn write_header<W: Write>(&self, out: &mut W, year: Year) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "AOC {}", year)
    }

    /// Format and write a single result
    ///
    /// Quiet mode drops the `Day N P (timing):` line and keeps only the
    /// answer or `[ERROR]` message.
    pub fn write_result<W: Write>(&self, out: &mut W, result: &SolveResult) -> io::Result<()> {
        if self.quiet {
            writeln!(out, "{}", result.outcome)
        } else {
            writeln!(out, "{}", result)
        }
    }

    /// One line per unlock instant in `range`
    pub fn write_instants<W: Write>(&self, out: &mut W, range: DateRange) -> io::Result<()> {
        for instant in range {
            match Date::from_instant(&instant) {
                Some(date) if !self.quiet => writeln!(out, "{:<12} {}", date.to_string(), instant.to_rfc3339())?,
                _ => writeln!(out, "{}", instant.to_rfc3339())?,
            }
        }
        Ok(())
    }
}

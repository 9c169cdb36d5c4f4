//! Error types for the calendar model

use std::time::Duration;
use thiserror::Error;

/// Error returned when a year is not a playable Advent of Code year
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YearError {
    /// Year precedes the first event
    #[error("advent of code first started in 2015, got {0}")]
    TooEarly(u16),
    /// Year lies beyond the current calendar year
    #[error("the latest advent of code is {latest}, got {year}")]
    TooLate { year: u16, latest: u16 },
    /// Year is the current calendar year but December 1st has not arrived yet
    #[error(
        "advent of code {year} starts in {}",
        humantime::format_duration(Duration::from_secs(.wait.as_secs()))
    )]
    NotYetUnlocked { year: u16, wait: Duration },
}

/// Error returned for a day outside 1..=25
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayError {
    #[error("invalid day: {0}, expected 1..=25")]
    OutOfRange(u8),
}

/// Error returned when parsing a `"<start>:<end>"` date range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Input was empty after trimming
    #[error("empty aoc date range")]
    Empty,
    /// Input has no `:` separator
    #[error("missing separator ':' in date range {0:?}")]
    MissingSeparator(String),
    /// One side is not of the form `YYYY-DD`
    #[error("malformed aoc date {0:?}, expected YYYY-DD")]
    Malformed(String),
    /// One side is well formed but names a year before 2015 or a day after 25
    #[error("{0:?} is not an aoc date")]
    NotAnAdventDate(String),
    /// An open-ended range whose start has not unlocked yet
    #[error("date range {0:?} starts after the latest unlocked puzzle")]
    NotYetUnlocked(String),
}

/// Any calendar validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error(transparent)]
    Year(#[from] YearError),
    #[error(transparent)]
    Day(#[from] DayError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

//! Date ranges over unlock instants
//!
//! A range is written `"<start>:<end>"` where each side is empty or `YYYY-DD`
//! (year and day of December). An empty start means the very first puzzle; an
//! empty end means the latest unlocked puzzle.

use crate::error::RangeError;
use crate::year::FIRST_YEAR;
use crate::{december, puzzle_timezone};
use chrono::{DateTime, Datelike, Days, FixedOffset, Utc};
use regex::Regex;
use std::iter::FusedIterator;
use std::sync::OnceLock;

/// An ascending, inclusive range of unlock instants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Consume the range into its unlock instants, one day at a time
    ///
    /// After December 25th the sequence continues at December 1st of the
    /// following year.
    pub fn generate(self) -> Instants {
        Instants {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = DateTime<FixedOffset>;
    type IntoIter = Instants;

    fn into_iter(self) -> Instants {
        self.generate()
    }
}

/// Lazy sequence of unlock instants produced by [`DateRange::generate`]
#[derive(Debug, Clone)]
pub struct Instants {
    next: Option<DateTime<FixedOffset>>,
    end: DateTime<FixedOffset>,
}

impl Iterator for Instants {
    type Item = DateTime<FixedOffset>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take().filter(|t| *t <= self.end)?;
        self.next = if current.day() >= 25 {
            Some(december(current.year() + 1, 1))
        } else {
            current.checked_add_days(Days::new(1))
        };
        Some(current)
    }
}

impl FusedIterator for Instants {}

/// The unlock instant of the most recent puzzle at `now`
///
/// Before December this is Dec 25 of the previous year; during December it is
/// today's puzzle, capped at day 25.
pub fn latest_unlocked_instant_at(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let local = now.with_timezone(&puzzle_timezone());
    if local.month() < 12 {
        december(local.year() - 1, 25)
    } else {
        december(local.year(), local.day().min(25))
    }
}

/// The unlock instant of the most recent puzzle right now
pub fn latest_unlocked_instant() -> DateTime<FixedOffset> {
    latest_unlocked_instant_at(Utc::now())
}

/// Parse a `"<start>:<end>"` range relative to the current time
pub fn parse_date_range(s: &str) -> Result<DateRange, RangeError> {
    parse_date_range_at(s, Utc::now())
}

/// Parse a `"<start>:<end>"` range, resolving an open end against `now`
///
/// A reversed range is swapped so that the result is always ascending. An
/// open end resolves to the latest unlocked puzzle, and a start past that
/// point is rejected rather than yielding an empty range.
pub fn parse_date_range_at(s: &str, now: DateTime<Utc>) -> Result<DateRange, RangeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RangeError::Empty);
    }

    let (start_s, end_s) = s
        .split_once(':')
        .ok_or_else(|| RangeError::MissingSeparator(s.to_string()))?;

    let first = december(i32::from(FIRST_YEAR), 1);

    let (start, end) = match (start_s.is_empty(), end_s.is_empty()) {
        (true, true) => up_to_latest(s, first, now)?,
        (false, true) => up_to_latest(s, parse_date(start_s)?, now)?,
        (true, false) => (first, parse_date(end_s)?),
        (false, false) => {
            let start = parse_date(start_s)?;
            let end = parse_date(end_s)?;
            if end < start { (end, start) } else { (start, end) }
        }
    };

    Ok(DateRange { start, end })
}

/// `start` up to the latest unlocked instant, which must not precede it
fn up_to_latest(
    s: &str,
    start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), RangeError> {
    let end = latest_unlocked_instant_at(now);
    if start > end {
        return Err(RangeError::NotYetUnlocked(s.to_string()));
    }
    Ok((start, end))
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("date pattern is valid"))
}

/// Parse one side of a range: `YYYY-DD`
fn parse_date(s: &str) -> Result<DateTime<FixedOffset>, RangeError> {
    let malformed = || RangeError::Malformed(s.to_string());
    let captures = date_regex().captures(s).ok_or_else(malformed)?;

    let year: u16 = captures[1].parse().map_err(|_| malformed())?;
    let day: u8 = captures[2].parse().map_err(|_| malformed())?;
    if day == 0 {
        return Err(malformed());
    }
    if year < FIRST_YEAR || day > 25 {
        return Err(RangeError::NotAnAdventDate(s.to_string()));
    }

    Ok(december(i32::from(year), u32::from(day)))
}

//! Puzzle years and the year-level unlock rule

use crate::day::Day;
use crate::error::YearError;
use crate::{puzzle_timezone, unlock_instant};
use chrono::{DateTime, Datelike, Utc};
use std::fmt;

/// The first Advent of Code year
pub const FIRST_YEAR: u16 = 2015;

/// An Advent of Code year (2015 or later)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u16);

impl Year {
    pub const FIRST: Year = Year(FIRST_YEAR);

    /// Create a year, rejecting anything before 2015
    ///
    /// This does not look at the clock; use [`validate_year`] to also reject
    /// years that have not unlocked yet.
    pub fn new(year: u16) -> Result<Self, YearError> {
        if year < FIRST_YEAR {
            return Err(YearError::TooEarly(year));
        }
        Ok(Self(year))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Whether December 1st of this year has arrived at `now`
    pub fn is_unlocked_at(self, now: DateTime<Utc>) -> bool {
        now >= unlock_instant(self, Day::FIRST).with_timezone(&Utc)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

/// Calendar year of `now` as seen from the puzzle zone
fn calendar_year_at(now: DateTime<Utc>) -> u16 {
    let year = now.with_timezone(&puzzle_timezone()).year();
    year.clamp(0, i32::from(u16::MAX)) as u16
}

/// All playable years at `now`, ascending
///
/// Every year from 2015 up to (excluding) the current calendar year, plus the
/// current year once its December 1st unlock has passed.
pub fn available_years_at(now: DateTime<Utc>) -> Vec<Year> {
    let current = calendar_year_at(now);
    let mut years: Vec<Year> = (FIRST_YEAR..current).map(Year).collect();
    if current >= FIRST_YEAR && Year(current).is_unlocked_at(now) {
        years.push(Year(current));
    }
    years
}

/// All playable years right now, ascending
pub fn available_years() -> Vec<Year> {
    available_years_at(Utc::now())
}

/// The most recent playable year at `now`, `None` before the first event
pub fn latest_year_at(now: DateTime<Utc>) -> Option<Year> {
    available_years_at(now).last().copied()
}

/// The most recent playable year right now
pub fn latest_year() -> Option<Year> {
    latest_year_at(Utc::now())
}

/// Check that `year` is playable at `now`
///
/// - before 2015: [`YearError::TooEarly`]
/// - after the current calendar year: [`YearError::TooLate`]
/// - the current calendar year before its unlock: [`YearError::NotYetUnlocked`]
///   carrying the remaining wait
pub fn validate_year_at(year: u16, now: DateTime<Utc>) -> Result<Year, YearError> {
    let candidate = Year::new(year)?;
    let current = calendar_year_at(now);

    if year > current {
        let latest = latest_year_at(now).map_or(FIRST_YEAR - 1, Year::get);
        return Err(YearError::TooLate { year, latest });
    }

    if year == current && !candidate.is_unlocked_at(now) {
        let unlock = unlock_instant(candidate, Day::FIRST).with_timezone(&Utc);
        let wait = (unlock - now).to_std().unwrap_or_default();
        return Err(YearError::NotYetUnlocked { year, wait });
    }

    Ok(candidate)
}

/// Check that `year` is playable right now
pub fn validate_year(year: u16) -> Result<Year, YearError> {
    validate_year_at(year, Utc::now())
}

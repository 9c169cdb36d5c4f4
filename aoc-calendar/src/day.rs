//! Days, parts and dates

use crate::error::DayError;
use crate::year::Year;
use crate::{puzzle_timezone, unlock_instant};
use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use std::fmt;

/// A puzzle day in 1..=25
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    pub const FIRST: Day = Day(1);
    pub const LAST: Day = Day(25);

    pub fn new(day: u8) -> Result<Self, DayError> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&day) {
            Ok(Self(day))
        } else {
            Err(DayError::OutOfRange(day))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All days, ascending. Reverse it to scan from the last day down.
    pub fn all() -> impl DoubleEndedIterator<Item = Day> {
        (Self::FIRST.0..=Self::LAST.0).map(Day)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0
    }
}

/// One of the two parts of a day's puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    A,
    B,
}

impl Part {
    pub fn as_str(self) -> &'static str {
        match self {
            Part::A => "A",
            Part::B => "B",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single puzzle: year plus day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: Year,
    pub day: Day,
}

impl Date {
    pub fn new(year: Year, day: Day) -> Self {
        Self { year, day }
    }

    /// The instant this puzzle unlocks
    pub fn unlock_instant(self) -> DateTime<FixedOffset> {
        unlock_instant(self.year, self.day)
    }

    /// The puzzle unlocking at `instant`, if it falls on December 1..=25 of a
    /// playable year in the puzzle zone
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<Self> {
        let local = instant.with_timezone(&puzzle_timezone());
        if local.month() != 12 {
            return None;
        }
        let year = Year::new(u16::try_from(local.year()).ok()?).ok()?;
        let day = Day::new(u8::try_from(local.day()).ok()?).ok()?;
        Some(Self { year, day })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {}", self.year, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_day_bounds() {
        assert_eq!(Day::new(0), Err(DayError::OutOfRange(0)));
        assert_eq!(Day::new(26), Err(DayError::OutOfRange(26)));
        assert_eq!(Day::new(1), Ok(Day::FIRST));
        assert_eq!(Day::new(25), Ok(Day::LAST));
    }

    #[test]
    fn test_all_days_descending() {
        let days: Vec<u8> = Day::all().rev().map(Day::get).collect();
        assert_eq!(days.len(), 25);
        assert_eq!(days.first(), Some(&25));
        assert_eq!(days.last(), Some(&1));
    }

    #[test]
    fn test_part_order_and_display() {
        assert!(Part::A < Part::B);
        assert_eq!(format!("Day{}{}", Day::new(3).unwrap(), Part::B), "Day3B");
    }

    #[test]
    fn test_date_from_instant_roundtrip() {
        let date = Date::new(Year::new(2019).unwrap(), Day::new(7).unwrap());
        let instant = date.unlock_instant().with_timezone(&Utc);
        assert_eq!(Date::from_instant(&instant), Some(date));
        assert_eq!(date.to_string(), "2019 day 7");
    }

    #[test]
    fn test_date_from_instant_outside_december() {
        let instant = puzzle_timezone()
            .with_ymd_and_hms(2019, 11, 30, 0, 0, 0)
            .unwrap();
        assert_eq!(Date::from_instant(&instant), None);
    }
}

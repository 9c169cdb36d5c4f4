//! Advent of Code calendar model
//!
//! Puzzles unlock at midnight in a fixed UTC-5 zone, one per day from
//! December 1st to December 25th, every year since 2015. This crate answers
//! the questions the runner asks about that schedule:
//!
//! - which years are playable right now ([`available_years`], [`validate_year`])
//! - what the latest unlocked puzzle instant is ([`latest_unlocked_instant`])
//! - which unlock instants a `"YYYY-DD:YYYY-DD"` range covers ([`parse_date_range`])
//!
//! Every function that depends on the current time has an `_at` twin that
//! takes `now` explicitly, so callers and tests never rely on the system clock.
//!
//! # Example
//!
//! ```
//! use aoc_calendar::{parse_date_range_at, puzzle_timezone};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let range = parse_date_range_at("2015-24:2016-02", now).unwrap();
//! let days: Vec<u32> = range.generate().map(|t| chrono::Datelike::day(&t)).collect();
//! assert_eq!(days, vec![24, 25, 1, 2]);
//! ```

mod day;
mod error;
mod range;
mod year;

use chrono::{DateTime, FixedOffset, TimeZone};

pub use day::{Date, Day, Part};
pub use error::{CalendarError, DayError, RangeError, YearError};
pub use range::{
    DateRange, Instants, latest_unlocked_instant, latest_unlocked_instant_at, parse_date_range,
    parse_date_range_at,
};
pub use year::{
    FIRST_YEAR, Year, available_years, available_years_at, latest_year, latest_year_at,
    validate_year, validate_year_at,
};

/// Offset west of UTC at which puzzles unlock (EST, UTC-5)
const UNLOCK_OFFSET_WEST_SECS: i32 = 5 * 60 * 60;

/// The fixed zone puzzles unlock in
pub fn puzzle_timezone() -> FixedOffset {
    FixedOffset::west_opt(UNLOCK_OFFSET_WEST_SECS).expect("UTC-5 is a valid offset")
}

/// Midnight of December `day` in `year`, in the puzzle zone
pub fn unlock_instant(year: Year, day: Day) -> DateTime<FixedOffset> {
    december(i32::from(year.get()), u32::from(day.get()))
}

/// Midnight of December `day` for a raw year/day pair already known to be in range
pub(crate) fn december(year: i32, day: u32) -> DateTime<FixedOffset> {
    puzzle_timezone()
        .with_ymd_and_hms(year, 12, day, 0, 0, 0)
        .single()
        .expect("December 1..=25 exists in every year of a fixed zone")
}

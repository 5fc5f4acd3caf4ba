//! Month/day offsets within a calendar year.

use chrono::{DateTime, Datelike, Days, Months};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Date;

/// 1970-01-01, day zero of polars `Date` values.
fn unix_epoch() -> Date {
    DateTime::UNIX_EPOCH.date_naive()
}

/// Convert a polars `Date` physical value (days since the unix epoch).
#[must_use]
pub fn date_from_epoch_days(days: i32) -> Option<Date> {
    let span = Days::new(u64::from(days.unsigned_abs()));
    if days >= 0 {
        unix_epoch().checked_add_days(span)
    } else {
        unix_epoch().checked_sub_days(span)
    }
}

/// Days since the unix epoch for `date`.
#[must_use]
pub fn epoch_days(date: Date) -> i32 {
    // chrono dates span well under i32::MAX days
    date.signed_duration_since(unix_epoch()).num_days() as i32
}

/// Zero-based month and day offsets of a date from January 1 of its year.
///
/// A group reporting on March 20 has offset `(2, 19)`. Re-anchoring the
/// offset on another year adds whole months, then whole days, to January 1,
/// so a February 29 offset rolls into March 1 in a common year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("+{month_offset}m +{day_offset}d")]
pub struct DayMonthOffset {
    /// Whole months after January (0..=11).
    pub month_offset: u32,
    /// Whole days after the first of the month (0..=30).
    pub day_offset: u32,
}

impl DayMonthOffset {
    /// Create an offset from raw components.
    #[must_use]
    pub const fn new(month_offset: u32, day_offset: u32) -> Self {
        Self { month_offset, day_offset }
    }

    /// Offset of `date` within its own year.
    #[must_use]
    pub fn of(date: Date) -> Self {
        Self { month_offset: date.month0(), day_offset: date.day0() }
    }

    /// January 1 of `year` plus this offset.
    ///
    /// Returns `None` when the result leaves chrono's supported range.
    #[must_use]
    pub fn anchor(self, year: i32) -> Option<Date> {
        Date::from_ymd_opt(year, 1, 1)?
            .checked_add_months(Months::new(self.month_offset))?
            .checked_add_days(Days::new(u64::from(self.day_offset)))
    }
}

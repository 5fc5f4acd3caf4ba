//! Output date layouts.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Error returned when text does not name one of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date layout '{given}' (valid layouts: {})", DateLayout::valid_layouts())]
pub struct LayoutParseError {
    /// The rejected text.
    pub given: String,
}

/// The fixed set of layouts a resampled date column can be rendered in.
///
/// Each layout displays as its chrono strftime text, which is also the
/// text accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateLayout {
    /// `%d/%m/%Y`
    #[display("%d/%m/%Y")]
    DayMonthYearSlash,
    /// `%m/%d/%Y`
    #[display("%m/%d/%Y")]
    MonthDayYearSlash,
    /// `%Y/%m/%d`
    #[display("%Y/%m/%d")]
    YearMonthDaySlash,
    /// `%Y/%d/%m`
    #[display("%Y/%d/%m")]
    YearDayMonthSlash,
    /// `%d-%m-%Y`
    #[display("%d-%m-%Y")]
    DayMonthYearDash,
    /// `%m-%d-%Y`
    #[display("%m-%d-%Y")]
    MonthDayYearDash,
    /// `%Y-%m-%d`
    #[display("%Y-%m-%d")]
    YearMonthDayDash,
    /// `%Y-%d-%m`
    #[display("%Y-%d-%m")]
    YearDayMonthDash,
}

impl DateLayout {
    /// Every accepted layout.
    pub const ALL: [Self; 8] = [
        Self::DayMonthYearSlash,
        Self::MonthDayYearSlash,
        Self::YearMonthDaySlash,
        Self::YearDayMonthSlash,
        Self::DayMonthYearDash,
        Self::MonthDayYearDash,
        Self::YearMonthDayDash,
        Self::YearDayMonthDash,
    ];

    /// The chrono strftime text for this layout.
    #[must_use]
    pub const fn strftime(&self) -> &'static str {
        match self {
            Self::DayMonthYearSlash => "%d/%m/%Y",
            Self::MonthDayYearSlash => "%m/%d/%Y",
            Self::YearMonthDaySlash => "%Y/%m/%d",
            Self::YearDayMonthSlash => "%Y/%d/%m",
            Self::DayMonthYearDash => "%d-%m-%Y",
            Self::MonthDayYearDash => "%m-%d-%Y",
            Self::YearMonthDayDash => "%Y-%m-%d",
            Self::YearDayMonthDash => "%Y-%d-%m",
        }
    }

    /// Field separator used by this layout.
    #[must_use]
    pub const fn separator(&self) -> char {
        match self {
            Self::DayMonthYearSlash
            | Self::MonthDayYearSlash
            | Self::YearMonthDaySlash
            | Self::YearDayMonthSlash => '/',
            _ => '-',
        }
    }

    /// Comma separated list of every accepted layout.
    #[must_use]
    pub fn valid_layouts() -> String {
        Self::ALL.iter().map(Self::strftime).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for DateLayout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|layout| layout.strftime() == trimmed)
            .ok_or_else(|| LayoutParseError { given: s.to_string() })
    }
}

impl TryFrom<String> for DateLayout {
    type Error = LayoutParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateLayout> for String {
    fn from(layout: DateLayout) -> Self {
        layout.strftime().to_string()
    }
}

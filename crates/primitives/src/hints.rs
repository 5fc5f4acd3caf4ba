//! Date parsing hints.

use serde::{Deserialize, Serialize};

/// Caller-supplied hints for turning date text into calendar dates.
///
/// An explicit `pattern` (chrono strftime syntax, e.g. `%d-%m-%Y`) takes
/// precedence over both flags. Without any hint, ambiguous numeric dates are
/// read month before day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseHints {
    /// Read ambiguous numeric dates day before month.
    pub day_first: bool,
    /// Read an ambiguous leading field as the year.
    pub year_first: bool,
    /// Exact expected layout of the text.
    pub pattern: Option<String>,
}

impl ParseHints {
    /// Hints with every option off.
    #[must_use]
    pub const fn new() -> Self {
        Self { day_first: false, year_first: false, pattern: None }
    }

    /// Set the day-first flag.
    #[must_use]
    pub const fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }

    /// Set the year-first flag.
    #[must_use]
    pub const fn with_year_first(mut self, year_first: bool) -> Self {
        self.year_first = year_first;
        self
    }

    /// Set an explicit parse pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Returns the explicit pattern, if any.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

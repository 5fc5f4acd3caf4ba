//! Key column names.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The two columns a resampling run is keyed on.
///
/// Every other column of the table is payload and is carried through
/// without inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("date={date}, group={group}")]
pub struct KeyColumns {
    date: String,
    group: String,
}

impl KeyColumns {
    /// Create a new key column pair.
    #[must_use]
    pub fn new(date: impl Into<String>, group: impl Into<String>) -> Self {
        Self { date: date.into(), group: group.into() }
    }

    /// Name of the date column.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Name of the group key column.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Both names, date first.
    #[must_use]
    pub fn as_array(&self) -> [&str; 2] {
        [&self.date, &self.group]
    }

    /// Whether both names refer to the same column.
    #[must_use]
    pub fn overlap(&self) -> bool {
        self.date == self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_columns_accessors() {
        let cols = KeyColumns::new("date", "id");
        assert_eq!(cols.date(), "date");
        assert_eq!(cols.group(), "id");
        assert_eq!(cols.as_array(), ["date", "id"]);
        assert!(!cols.overlap());
    }

    #[test]
    fn key_columns_display() {
        let cols = KeyColumns::new("when", "who");
        assert_eq!(cols.to_string(), "date=when, group=who");
    }

    #[test]
    fn key_columns_overlap() {
        assert!(KeyColumns::new("x", "x").overlap());
    }
}

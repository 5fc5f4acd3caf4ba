//! Date parsing trait definitions.

use annualize_primitives::Date;

/// A date value could not be read under the active rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse date '{value}' at row {row} using {rule}")]
pub struct DateParseError {
    /// Row position within the frame being parsed. The fit/transform
    /// pipeline reports the position in the caller's input table.
    pub row: usize,
    /// The offending text.
    pub value: String,
    /// Description of the rule that rejected it.
    pub rule: String,
}

/// Turns a single piece of date text into a calendar date.
pub trait DateParser: Send + Sync {
    /// Parse one value, returning `None` when the text does not match.
    fn parse(&self, text: &str) -> Option<Date>;

    /// Human readable description of the active rule.
    fn rule(&self) -> String;

    /// Parse the value found at `row`, attaching context on failure.
    ///
    /// # Errors
    /// Returns `DateParseError` naming the row, the text and the rule.
    fn parse_at(&self, row: usize, text: &str) -> Result<Date, DateParseError> {
        self.parse(text).ok_or_else(|| DateParseError {
            row,
            value: text.to_string(),
            rule: self.rule(),
        })
    }
}

//! Transform options.

use annualize_primitives::ParseHints;
use serde::{Deserialize, Serialize};

/// Options for a transform run.
///
/// Deserializes from a flat map, e.g.
/// `{"day_first": true, "output_format": "%d-%m-%Y"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// How to read date text.
    #[serde(flatten)]
    pub hints: ParseHints,
    /// Layout to render the resampled dates in (None keeps calendar dates).
    pub output_format: Option<String>,
    /// Name of a boolean column marking observed rows (None to omit it).
    pub observed_flag: Option<String>,
}

impl TransformOptions {
    /// Options with every setting at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parse hints.
    #[must_use]
    pub fn with_hints(mut self, hints: ParseHints) -> Self {
        self.hints = hints;
        self
    }

    /// Read ambiguous numeric dates day before month.
    #[must_use]
    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.hints.day_first = day_first;
        self
    }

    /// Read an ambiguous leading field as the year.
    #[must_use]
    pub fn with_year_first(mut self, year_first: bool) -> Self {
        self.hints.year_first = year_first;
        self
    }

    /// Parse dates with an exact strftime pattern.
    #[must_use]
    pub fn with_parse_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.hints.pattern = Some(pattern.into());
        self
    }

    /// Render resampled dates in this layout.
    #[must_use]
    pub fn with_output_format(mut self, layout: impl Into<String>) -> Self {
        self.output_format = Some(layout.into());
        self
    }

    /// Add a boolean column marking observed rows.
    #[must_use]
    pub fn with_observed_flag(mut self, name: impl Into<String>) -> Self {
        self.observed_flag = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = TransformOptions::default();
        assert_eq!(options.hints, ParseHints::default());
        assert!(options.output_format.is_none());
        assert!(options.observed_flag.is_none());
    }

    #[test]
    fn options_builder() {
        let options = TransformOptions::new()
            .with_day_first(true)
            .with_parse_pattern("%d-%m-%Y")
            .with_output_format("%Y-%m-%d");
        assert!(options.hints.day_first);
        assert!(!options.hints.year_first);
        assert_eq!(options.hints.pattern(), Some("%d-%m-%Y"));
        assert_eq!(options.output_format.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn options_deserialize_flat() {
        let options: TransformOptions =
            serde_json::from_str(r#"{"day_first": true, "output_format": "%d-%m-%Y"}"#).unwrap();
        assert!(options.hints.day_first);
        assert_eq!(options.output_format.as_deref(), Some("%d-%m-%Y"));
    }
}

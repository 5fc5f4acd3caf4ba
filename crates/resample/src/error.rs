//! Error types for the resampling pipeline.

use annualize_dates::DatesError;
use annualize_primitives::LayoutParseError;
use annualize_traits::{DateParseError, ResampleError};
use annualize_utils::UtilsError;

/// Errors that can occur while fitting, transforming or rendering.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Bad fit arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Date text could not be parsed under the active rule.
    #[error(transparent)]
    DateParse(#[from] DateParseError),

    /// Resampler error.
    #[error("resample error: {0}")]
    Resample(#[from] ResampleError),

    /// The requested output layout is not one of the accepted layouts.
    #[error("unknown date layout '{given}' (valid layouts: {valid})")]
    UnknownLayout {
        /// The rejected layout text.
        given: String,
        /// Every accepted layout.
        valid: String,
    },

    /// Date column handling error.
    #[error("date error: {0}")]
    Dates(DatesError),

    /// Frame utility error.
    #[error("utils error: {0}")]
    Utils(#[from] UtilsError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl PipelineError {
    /// Returns whether this error leaves the pipeline state usable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownLayout { .. })
    }
}

impl From<DatesError> for PipelineError {
    fn from(err: DatesError) -> Self {
        match err {
            DatesError::Parse(e) => Self::DateParse(e),
            other => Self::Dates(other),
        }
    }
}

impl From<LayoutParseError> for PipelineError {
    fn from(err: LayoutParseError) -> Self {
        Self::UnknownLayout {
            given: err.given,
            valid: annualize_primitives::DateLayout::valid_layouts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PipelineError::Validation("column 'date' not found".to_string());
        assert!(err.to_string().contains("'date'"));
    }

    #[test]
    fn error_is_recoverable() {
        let err: PipelineError = LayoutParseError { given: "%Y".to_string() }.into();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("%d/%m/%Y"));

        let err = PipelineError::Validation("bad".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn dates_parse_error_is_lifted() {
        let parse =
            DateParseError { row: 0, value: "x".to_string(), rule: "pattern '%Y'".to_string() };
        let err: PipelineError = DatesError::Parse(parse).into();
        assert!(matches!(err, PipelineError::DateParse(e) if e.value == "x"));
    }
}

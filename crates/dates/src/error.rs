//! Error types for date handling.

use annualize_traits::DateParseError;
use polars::prelude::DataType;

/// Errors that can occur while parsing or rendering date columns.
#[derive(Debug, thiserror::Error)]
pub enum DatesError {
    /// A value could not be parsed.
    #[error(transparent)]
    Parse(#[from] DateParseError),

    /// The column dtype cannot hold or produce calendar dates.
    #[error("column {column} has unsupported type {dtype} for dates")]
    UnsupportedType {
        /// Column name.
        column: String,
        /// Actual dtype.
        dtype: DataType,
    },

    /// A per-row input does not match the frame height.
    #[error("column {column} has {expected} rows but {actual} values were given")]
    LengthMismatch {
        /// Column name.
        column: String,
        /// Frame height.
        expected: usize,
        /// Values supplied.
        actual: usize,
    },

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

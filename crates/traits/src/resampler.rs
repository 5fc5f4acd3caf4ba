//! Resampler trait definitions.

use annualize_primitives::{KeyColumns, ResampleStats};
use polars::prelude::*;

/// Errors that can occur while expanding a parsed table.
#[derive(Debug, thiserror::Error)]
pub enum ResampleError {
    /// The date column reached the resampler without a calendar date type.
    #[error("date column {column} must be Date typed, found {dtype}")]
    NotDateTyped {
        /// Column name.
        column: String,
        /// Actual dtype.
        dtype: DataType,
    },

    /// A usable row carried a null date.
    #[error("null date at row {row} of column {column}")]
    MissingDate {
        /// Column name.
        column: String,
        /// Row position.
        row: usize,
    },

    /// A reconstructed date fell outside the representable calendar.
    #[error("cannot place offset {offset} in year {year}")]
    UnresolvedDate {
        /// Bucket year.
        year: i32,
        /// Offset description.
        offset: String,
    },

    /// An output column would overwrite an input column.
    #[error("output column {0} already exists in the input")]
    ColumnClash(String),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),
}

impl ResampleError {
    /// Returns whether this error points at the input rather than a bug upstream.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingColumn(_) | Self::ColumnClash(_) | Self::UnresolvedDate { .. })
    }
}

/// Expands a parsed table of usable rows to a target frequency.
pub trait Resampler: Send + Sync {
    /// Configuration type for this resampler.
    type Config: Default + Clone + Send + Sync;

    /// Create a new resampler with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Resample usable rows.
    ///
    /// # Arguments
    /// * `usable` - Rows with a non-null `Date` column and group key
    /// * `columns` - Names of the date and group key columns
    ///
    /// # Returns
    /// Tuple of (resampled frame, run statistics)
    ///
    /// # Errors
    /// Returns `ResampleError` if the date column is not a calendar date or a
    /// group's span cannot be computed.
    fn resample(
        &self,
        usable: &DataFrame,
        columns: &KeyColumns,
    ) -> Result<(DataFrame, ResampleStats), ResampleError>;

    /// Short name of the target frequency.
    fn frequency(&self) -> &str;
}

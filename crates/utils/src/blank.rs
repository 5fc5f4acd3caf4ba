//! Blank text normalization.

use polars::prelude::*;

use crate::UtilsError;

/// Replace empty or whitespace-only values of a text column with null.
///
/// Non-text columns are returned unchanged. Non-blank text is kept as is,
/// surrounding whitespace included.
///
/// # Arguments
/// * `df` - Input frame
/// * `column` - Text column to normalize
///
/// # Returns
/// Tuple of (normalized frame, number of values turned into null).
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if `column` is absent.
pub fn normalize_blank(df: &DataFrame, column: &str) -> Result<(DataFrame, usize), UtilsError> {
    let values =
        df.column(column).map_err(|_| UtilsError::MissingColumn(column.to_string()))?;

    if values.dtype() != &DataType::String {
        return Ok((df.clone(), 0));
    }

    let text = values.str()?;
    let nulls_before = text.null_count();
    let normalized: StringChunked =
        text.into_iter().map(|v| v.filter(|s| !s.trim().is_empty())).collect();
    let blanked = normalized.null_count() - nulls_before;

    let mut out = df.clone();
    out.with_column(normalized.with_name(column.into()).into_series())?;

    Ok((out, blanked))
}

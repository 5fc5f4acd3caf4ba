//! Column presence checks.

use polars::prelude::*;

use crate::UtilsError;

/// Ensure every named column exists in `df`.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` for the first absent name and
/// `UtilsError::InvalidParameter` when no names are given.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<(), UtilsError> {
    if names.is_empty() {
        return Err(UtilsError::InvalidParameter("no columns requested".to_string()));
    }

    match names.iter().find(|&&name| df.column(name).is_err()) {
        Some(missing) => Err(UtilsError::MissingColumn((*missing).to_string())),
        None => Ok(()),
    }
}

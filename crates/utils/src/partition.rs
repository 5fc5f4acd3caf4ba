//! Usable / excluded row partitioning.

use polars::prelude::*;

use crate::UtilsError;

/// Rows split by whether both key columns are present.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Rows with a date and a group key, in input order.
    pub usable: DataFrame,
    /// Rows missing either key, in input order.
    pub excluded: DataFrame,
    /// Input position of each usable row.
    pub usable_rows: Vec<usize>,
    /// Input position of each excluded row.
    pub excluded_rows: Vec<usize>,
}

impl Partition {
    /// Total rows across both sides.
    #[must_use]
    pub fn height(&self) -> usize {
        self.usable.height() + self.excluded.height()
    }
}

/// Split rows into usable and excluded sets.
///
/// A row is excluded when its date or its group key is null. A NaN group
/// key in a float column counts as missing. Both sides keep the input order.
///
/// # Arguments
/// * `df` - Input frame
/// * `date_col` - Date column
/// * `group_col` - Group key column
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if either column is absent.
pub fn partition_rows(
    df: &DataFrame,
    date_col: &str,
    group_col: &str,
) -> Result<Partition, UtilsError> {
    let group_dtype = df
        .column(group_col)
        .map_err(|_| UtilsError::MissingColumn(group_col.to_string()))?
        .dtype()
        .clone();
    if df.column(date_col).is_err() {
        return Err(UtilsError::MissingColumn(date_col.to_string()));
    }

    let mut mask = col(date_col).is_not_null().and(col(group_col).is_not_null());
    if group_dtype.is_float() {
        mask = mask.and(col(group_col).is_not_nan());
    }
    // Null-safe so that every row lands on exactly one side
    let mask = df.clone().lazy().select([mask.fill_null(lit(false)).alias("usable")]).collect()?;
    let mask = mask.column("usable")?.bool()?.clone();

    let usable = df.filter(&mask)?;
    let excluded = df.filter(&!&mask)?;

    let (mut usable_rows, mut excluded_rows) = (Vec::new(), Vec::new());
    for (row, keep) in mask.into_no_null_iter().enumerate() {
        if keep {
            usable_rows.push(row);
        } else {
            excluded_rows.push(row);
        }
    }

    Ok(Partition { usable, excluded, usable_rows, excluded_rows })
}

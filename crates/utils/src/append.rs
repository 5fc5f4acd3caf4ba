//! Row appending.

use polars::prelude::*;

use crate::UtilsError;

/// Stack `tail` under `head`.
///
/// Rows of `head` come first in their order, then rows of `tail` in theirs.
/// Columns of `head` that `tail` lacks are filled with nulls for the tail
/// rows; the result keeps the column order of `head`.
///
/// # Errors
/// Returns `UtilsError::InvalidParameter` when `tail` has a column `head`
/// does not.
pub fn append_rows(head: &DataFrame, tail: &DataFrame) -> Result<DataFrame, UtilsError> {
    if let Some(extra) = tail.get_column_names().into_iter().find(|name| head.column(name).is_err())
    {
        return Err(UtilsError::InvalidParameter(format!(
            "cannot append rows with column {extra} absent from the leading frame"
        )));
    }

    let mut aligned = tail.clone();
    for column in head.get_columns() {
        if tail.column(column.name()).is_err() {
            aligned.with_column(Column::full_null(
                column.name().clone(),
                tail.height(),
                column.dtype(),
            ))?;
        }
    }
    let aligned = aligned.select(head.get_column_names().into_iter().cloned())?;

    let args = UnionArgs { rechunk: true, ..Default::default() };
    let stacked = concat([head.clone().lazy(), aligned.lazy()], args)?.collect()?;

    Ok(stacked)
}

//! Date column rendering.

use annualize_primitives::{Date, DateLayout};
use polars::prelude::*;

use crate::{DatesError, collect_dates};

/// Render a `Date` column as text in `layout`.
///
/// Always renders from the calendar values, so rendering the same frame
/// twice yields identical text. Null dates stay null.
///
/// # Errors
/// Returns `DatesError::UnsupportedType` if the column is not `Date` typed.
pub fn format_date_column(
    df: &DataFrame,
    column: &str,
    layout: DateLayout,
) -> Result<DataFrame, DatesError> {
    let values = df.column(column).map_err(|_| DatesError::MissingColumn(column.to_string()))?;
    let fmt = layout.strftime();

    let text: StringChunked = collect_dates(values)?
        .into_iter()
        .map(|date| date.map(|d| d.format(fmt).to_string()))
        .collect();

    let mut out = df.clone();
    out.with_column(text.with_name(column.into()).into_series())?;
    Ok(out)
}

/// Render `dates` into the text of `column`, one per row.
///
/// Rows with a date are rendered in `layout`; rows without one keep their
/// current value as text, so unreadable input survives unchanged.
///
/// # Errors
/// Returns `DatesError::LengthMismatch` if `dates` does not cover every row.
pub fn format_date_values(
    df: &DataFrame,
    column: &str,
    dates: &[Option<Date>],
    layout: DateLayout,
) -> Result<DataFrame, DatesError> {
    let values = df.column(column).map_err(|_| DatesError::MissingColumn(column.to_string()))?;
    if dates.len() != values.len() {
        return Err(DatesError::LengthMismatch {
            column: column.to_string(),
            expected: values.len(),
            actual: dates.len(),
        });
    }

    let fmt = layout.strftime();
    let current = values.cast(&DataType::String)?;
    let text: StringChunked = current
        .str()?
        .into_iter()
        .zip(dates)
        .map(|(value, date)| match date {
            Some(d) => Some(d.format(fmt).to_string()),
            None => value.map(str::to_string),
        })
        .collect();

    let mut out = df.clone();
    out.with_column(text.with_name(column.into()).into_series())?;
    Ok(out)
}

//! Date column parsing and ordering.

use annualize_primitives::{Date, date_from_epoch_days};
use annualize_traits::DateParser;
use polars::prelude::*;

use crate::DatesError;

/// Read a `Date` column into calendar dates.
///
/// # Errors
/// Returns `DatesError::UnsupportedType` if the column is not `Date` typed.
pub fn collect_dates(values: &Column) -> Result<Vec<Option<Date>>, DatesError> {
    if values.dtype() != &DataType::Date {
        return Err(DatesError::UnsupportedType {
            column: values.name().to_string(),
            dtype: values.dtype().clone(),
        });
    }

    let days = values.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|d| d.and_then(date_from_epoch_days)).collect())
}

/// Convert a column to calendar dates.
///
/// Text is parsed value by value with `parser`; nulls stay null. `Date`
/// columns pass through, `Datetime` columns are truncated to their date and
/// all-null columns become `Date` typed.
///
/// # Arguments
/// * `df` - Input frame
/// * `column` - Column to convert
/// * `parser` - Rule for text values
///
/// # Errors
/// Returns `DatesError::Parse` for the first value the parser rejects, and
/// `DatesError::UnsupportedType` for columns that cannot hold dates.
pub fn parse_date_column<P>(df: &DataFrame, column: &str, parser: &P) -> Result<DataFrame, DatesError>
where
    P: DateParser + ?Sized,
{
    let values = df.column(column).map_err(|_| DatesError::MissingColumn(column.to_string()))?;

    let parsed = match values.dtype() {
        DataType::Date => return Ok(df.clone()),
        DataType::Datetime(_, _) | DataType::Null => values.cast(&DataType::Date)?,
        DataType::String => {
            let dates = values
                .str()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| value.map(|text| parser.parse_at(row, text)).transpose())
                .collect::<Result<Vec<Option<Date>>, _>>()?;
            Column::new(column.into(), dates)
        }
        other => {
            return Err(DatesError::UnsupportedType {
                column: column.to_string(),
                dtype: other.clone(),
            });
        }
    };

    let mut out = df.clone();
    out.with_column(parsed)?;
    Ok(out)
}

/// Read a column as calendar dates without failing on unparseable text.
///
/// Text the parser rejects reads as `None`, like a null. The frame is not
/// modified.
///
/// # Errors
/// Returns `DatesError::UnsupportedType` for columns that cannot hold dates.
pub fn try_parse_dates<P>(values: &Column, parser: &P) -> Result<Vec<Option<Date>>, DatesError>
where
    P: DateParser + ?Sized,
{
    match values.dtype() {
        DataType::Date => collect_dates(values),
        DataType::Datetime(_, _) | DataType::Null => collect_dates(&values.cast(&DataType::Date)?),
        DataType::String => Ok(values
            .str()?
            .into_iter()
            .map(|value| value.and_then(|text| parser.parse(text)))
            .collect()),
        other => Err(DatesError::UnsupportedType {
            column: values.name().to_string(),
            dtype: other.clone(),
        }),
    }
}

/// Sort rows ascending by a `Date` column.
///
/// The sort is stable: rows sharing a date keep their input order. Null
/// dates sort last.
///
/// # Errors
/// Returns `DatesError::UnsupportedType` if the column is not `Date` typed.
pub fn sort_by_date(df: &DataFrame, column: &str) -> Result<DataFrame, DatesError> {
    let values = df.column(column).map_err(|_| DatesError::MissingColumn(column.to_string()))?;
    if values.dtype() != &DataType::Date {
        return Err(DatesError::UnsupportedType {
            column: column.to_string(),
            dtype: values.dtype().clone(),
        });
    }

    let sort_options = SortMultipleOptions::new().with_maintain_order(true).with_nulls_last(true);
    Ok(df.clone().lazy().sort([column], sort_options).collect()?)
}

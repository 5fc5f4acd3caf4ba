//! Row preparation ahead of parsing.

use annualize_primitives::KeyColumns;
use annualize_utils::{Partition, normalize_blank, partition_rows};
use polars::prelude::*;
use tracing::debug;

use crate::PipelineError;

/// Rows of a fitted table split for resampling.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Rows with a date and a group key, in input order.
    pub usable: DataFrame,
    /// Rows missing either key, in input order.
    pub excluded: DataFrame,
    /// Input position of each usable row.
    pub usable_rows: Vec<usize>,
    /// Date values that were blank text and are now null.
    pub blanked: usize,
}

/// Null out blank date text and split rows into usable / excluded.
///
/// # Errors
/// Returns `PipelineError::Utils` if a key column is absent.
pub fn prepare(table: &DataFrame, columns: &KeyColumns) -> Result<Prepared, PipelineError> {
    let (normalized, blanked) = normalize_blank(table, columns.date())?;
    let Partition { usable, excluded, usable_rows, .. } =
        partition_rows(&normalized, columns.date(), columns.group())?;

    debug!(
        "Prepared {} rows: {} usable, {} excluded ({} blank dates)",
        table.height(),
        usable.height(),
        excluded.height(),
        blanked
    );

    Ok(Prepared { usable, excluded, usable_rows, blanked })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_splits_blank_and_missing_keys() {
        let df = df! {
            "date" => &[Some("03-03-2016"), Some(""), Some("  "), Some("01-01-2001"), None],
            "id" => &[Some(4.0), Some(4.0), Some(4.0), None, Some(5.0)],
            "value" => &[1, 2, 3, 4, 5],
        }
        .unwrap();

        let prepared = prepare(&df, &KeyColumns::new("date", "id")).unwrap();
        assert_eq!(prepared.blanked, 2);
        assert_eq!(prepared.usable.height(), 1);
        assert_eq!(prepared.excluded.height(), 4);
        assert_eq!(prepared.usable_rows, vec![0]);

        let excluded: Vec<i32> =
            prepared.excluded.column("value").unwrap().i32().unwrap().into_no_null_iter().collect();
        assert_eq!(excluded, vec![2, 3, 4, 5]);

        // Blank text is null on the excluded side too
        let dates: Vec<Option<&str>> =
            prepared.excluded.column("date").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(dates, vec![None, None, Some("01-01-2001"), None]);
    }

    #[test]
    fn prepare_leaves_input_untouched() {
        let df = df! {
            "date" => &[Some(" "), Some("01-01-2001")],
            "id" => &[1, 1],
        }
        .unwrap();
        let before = df.clone();

        prepare(&df, &KeyColumns::new("date", "id")).unwrap();
        assert!(df.equals_missing(&before));
    }
}

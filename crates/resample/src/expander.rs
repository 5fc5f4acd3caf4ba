//! Yearly expansion of grouped observations.

use std::ops::Range;

use annualize_primitives::{Date, DayMonthOffset, KeyColumns, ResampleStats, date_from_epoch_days};
use annualize_traits::{ResampleError, Resampler};
use chrono::Datelike;
use polars::prelude::*;

/// Configuration for yearly expansion.
#[derive(Debug, Clone, Default)]
pub struct ExpanderConfig {
    /// Name of a boolean column marking rows backed by an observation
    /// (None to omit it).
    pub observed_flag: Option<String>,
}

/// First observation of one calendar year within a group.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    year: i32,
    row: IdxSize,
    offset: DayMonthOffset,
}

/// One output row.
#[derive(Debug, Clone, Copy)]
struct Slot {
    group_row: IdxSize,
    year: i32,
    source: Option<IdxSize>,
    offset: DayMonthOffset,
}

/// Annual resampler.
///
/// Rows are grouped by key and bucketed by calendar year; the earliest row
/// of each year represents it. Every year between a group's first and last
/// bucket is emitted. Inserted years take the month/day offset of the most
/// recent observed year, so a group that switches from March 20 to June 5
/// keeps March 20 until the switch and June 5 afterwards.
#[derive(Debug, Clone, Default)]
pub struct YearlyExpander {
    config: ExpanderConfig,
}

impl YearlyExpander {
    /// Create a new expander with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExpanderConfig::default())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExpanderConfig {
        &self.config
    }
}

/// Bucket rows `rows` of one group by year.
///
/// Rows must be in date order, so the first row seen for a year is its
/// earliest.
fn year_buckets(
    days: &Int32Chunked,
    rows: Range<usize>,
    date_col: &str,
) -> Result<Vec<Bucket>, ResampleError> {
    let mut buckets: Vec<Bucket> = Vec::new();

    for row in rows {
        let date: Date = days.get(row).and_then(date_from_epoch_days).ok_or_else(|| {
            ResampleError::MissingDate { column: date_col.to_string(), row }
        })?;
        let year = date.year();

        if buckets.last().is_none_or(|b| b.year != year) {
            buckets.push(Bucket { year, row: row as IdxSize, offset: DayMonthOffset::of(date) });
        }
    }

    Ok(buckets)
}

/// Emit one slot per year from the first to the last bucket.
///
/// The offset is carried forward only: a year without a bucket repeats the
/// offset of the closest earlier bucket, never a later one.
fn expand_group(group_row: IdxSize, buckets: &[Bucket], slots: &mut Vec<Slot>) {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return;
    };

    let mut observed = buckets.iter().peekable();
    let mut carried = first.offset;

    for year in first.year..=last.year {
        let source = match observed.next_if(|b| b.year == year) {
            Some(bucket) => {
                carried = bucket.offset;
                Some(bucket.row)
            }
            None => None,
        };
        slots.push(Slot { group_row, year, source, offset: carried });
    }
}

impl Resampler for YearlyExpander {
    type Config = ExpanderConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn resample(
        &self,
        usable: &DataFrame,
        columns: &KeyColumns,
    ) -> Result<(DataFrame, ResampleStats), ResampleError> {
        let date_col = columns.date();
        let group_col = columns.group();

        for name in columns.as_array() {
            if usable.column(name).is_err() {
                return Err(ResampleError::MissingColumn(name.to_string()));
            }
        }
        let flag = self.config.observed_flag.as_deref();
        if let Some(clash) = flag.filter(|name| usable.column(name).is_ok()) {
            return Err(ResampleError::ColumnClash(clash.to_string()));
        }
        let dtype = usable.column(date_col)?.dtype();
        if dtype != &DataType::Date {
            return Err(ResampleError::NotDateTyped {
                column: date_col.to_string(),
                dtype: dtype.clone(),
            });
        }

        // Group rows together, chronological within a group, ties in input order
        let sort_options = SortMultipleOptions::new().with_maintain_order(true);
        let sorted = usable.clone().lazy().sort([group_col, date_col], sort_options).collect()?;

        let days = sorted.column(date_col)?.cast(&DataType::Int32)?;
        let days = days.i32()?;
        let keys = sorted.column(group_col)?;

        let height = sorted.height();
        let mut stats = ResampleStats::default();
        let mut slots: Vec<Slot> = Vec::with_capacity(height);

        let mut start = 0;
        while start < height {
            let key = keys.get(start)?;
            let mut end = start + 1;
            while end < height && keys.get(end)? == key {
                end += 1;
            }

            let buckets = year_buckets(days, start..end, date_col)?;
            stats.groups += 1;
            stats.collapsed += (end - start) - buckets.len();
            expand_group(start as IdxSize, &buckets, &mut slots);

            start = end;
        }

        let dates = slots
            .iter()
            .map(|slot| {
                slot.offset.anchor(slot.year).ok_or_else(|| ResampleError::UnresolvedDate {
                    year: slot.year,
                    offset: slot.offset.to_string(),
                })
            })
            .collect::<Result<Vec<Date>, _>>()?;

        let sources =
            IdxCa::from_iter_options("source".into(), slots.iter().map(|slot| slot.source));
        let group_rows =
            IdxCa::from_vec("group_row".into(), slots.iter().map(|slot| slot.group_row).collect());

        // Null sources yield all-null payload rows
        let mut out = sorted.take(&sources)?;
        out.with_column(keys.take(&group_rows)?)?;
        out.with_column(Column::new(date_col.into(), dates))?;

        if let Some(flag) = &self.config.observed_flag {
            let observed: BooleanChunked = slots.iter().map(|slot| slot.source.is_some()).collect();
            out.with_column(observed.with_name(flag.as_str().into()).into_series())?;
        }

        stats.observed = sources.len() - sources.null_count();
        stats.synthesized = sources.null_count();

        Ok((out, stats))
    }

    fn frequency(&self) -> &str {
        "annual"
    }
}

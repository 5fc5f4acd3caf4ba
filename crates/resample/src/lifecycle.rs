//! Fit / transform lifecycle.
//!
//! Each stage consumes or borrows the previous one and returns a new value:
//! [`YearlyResampler::fit`] yields a [`Fitted`] table, [`Fitted::transform`]
//! consumes it and yields a [`Transformed`] result. A table cannot be
//! transformed before it is fitted, nor transformed twice.

use std::str::FromStr;

use annualize_dates::{
    DatesError, HintedParser, format_date_column, format_date_values, parse_date_column,
    sort_by_date, try_parse_dates,
};
use annualize_primitives::{Date, DateLayout, KeyColumns, ResampleStats};
use annualize_traits::{DateParser, Resampler};
use annualize_utils::{UtilsError, append_rows, require_columns};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::prepare::prepare;
use crate::{ExpanderConfig, PipelineError, Prepared, TransformOptions, YearlyExpander};

/// Entry point of the lifecycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearlyResampler;

impl YearlyResampler {
    /// Validate and take a private copy of `table`.
    ///
    /// # Errors
    /// Returns `PipelineError::Validation` if either column is absent or both
    /// names refer to the same column.
    pub fn fit(
        table: &DataFrame,
        date_column: &str,
        group_column: &str,
    ) -> Result<Fitted, PipelineError> {
        let columns = KeyColumns::new(date_column, group_column);
        if columns.overlap() {
            return Err(PipelineError::Validation(format!(
                "date and group column must differ, both are '{date_column}'"
            )));
        }

        require_columns(table, &columns.as_array()).map_err(|err| match err {
            UtilsError::MissingColumn(name) => {
                PipelineError::Validation(format!("column '{name}' not found in table"))
            }
            other => other.into(),
        })?;

        info!(
            "Fitted table with {} rows and {} columns ({})",
            table.height(),
            table.width(),
            columns
        );

        Ok(Fitted { table: table.clone(), columns })
    }

    /// Fit and transform in one step.
    ///
    /// # Errors
    /// Returns the first error of [`Self::fit`] or [`Fitted::transform`].
    pub fn fit_transform(
        table: &DataFrame,
        date_column: &str,
        group_column: &str,
        options: &TransformOptions,
    ) -> Result<Transformed, PipelineError> {
        Self::fit(table, date_column, group_column)?.transform(options)
    }
}

/// A validated table awaiting transformation.
#[derive(Debug, Clone)]
pub struct Fitted {
    table: DataFrame,
    columns: KeyColumns,
}

impl Fitted {
    /// The key columns.
    #[must_use]
    pub const fn columns(&self) -> &KeyColumns {
        &self.columns
    }

    /// The fitted copy of the input table.
    #[must_use]
    pub const fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Split the fitted table into usable and excluded rows.
    ///
    /// # Errors
    /// Returns `PipelineError::Utils` if a key column cannot be read.
    pub fn prepare(&self) -> Result<Prepared, PipelineError> {
        prepare(&self.table, &self.columns)
    }

    /// Prepare, parse and resample with the default annual expander.
    ///
    /// An unknown `output_format` is reported with a warning and the dates
    /// are returned as calendar dates.
    ///
    /// # Errors
    /// Returns `PipelineError::Validation` if the observed flag names an
    /// existing column, `PipelineError::DateParse` if a usable date cannot be
    /// parsed and `PipelineError::Resample` if expansion fails.
    pub fn transform(self, options: &TransformOptions) -> Result<Transformed, PipelineError> {
        let flag = options.observed_flag.as_deref();
        if let Some(clash) = flag.filter(|name| self.table.column(name).is_ok()) {
            return Err(PipelineError::Validation(format!(
                "observed flag column '{clash}' already exists in the table"
            )));
        }

        let parser = HintedParser::new(options.hints.clone());
        let expander = YearlyExpander::with_config(ExpanderConfig {
            observed_flag: options.observed_flag.clone(),
        });

        let mut transformed = self.transform_with(&parser, &expander)?;

        if let Some(pattern) = options.output_format.as_deref() {
            match transformed.change_format(pattern) {
                Ok(_) => {}
                Err(err) if err.is_recoverable() => {
                    debug!("Keeping calendar dates after rejected output format");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(transformed)
    }

    /// Prepare, parse and resample with a caller-supplied parser and resampler.
    ///
    /// Usable rows are parsed and sorted by date before resampling. Excluded
    /// rows are kept as they are; their dates are only read, leniently, so
    /// [`Transformed::change_format`] can render the ones that parse.
    ///
    /// # Errors
    /// Returns `PipelineError::DateParse`, naming the input row, if a usable
    /// date cannot be parsed and `PipelineError::Resample` if expansion fails.
    pub fn transform_with<P, R>(self, parser: &P, resampler: &R) -> Result<Transformed, PipelineError>
    where
        P: DateParser + ?Sized,
        R: Resampler,
    {
        let Prepared { usable, excluded, usable_rows, .. } = self.prepare()?;
        let date_col = self.columns.date();

        debug!("Parsing dates using {}", parser.rule());
        let parsed = parse_date_column(&usable, date_col, parser)
            .map_err(|err| at_input_row(err, &usable_rows))?;
        let usable = sort_by_date(&parsed, date_col)?;
        let excluded_dates = try_parse_dates(excluded.column(date_col)?, parser)?;

        let (resampled, mut stats) = resampler.resample(&usable, &self.columns)?;
        stats.excluded = excluded.height();

        info!(
            "Resampled {} groups to {} frequency: {} observed, {} synthesized, {} collapsed, {} excluded",
            stats.groups,
            resampler.frequency(),
            stats.observed,
            stats.synthesized,
            stats.collapsed,
            stats.excluded
        );

        Ok(Transformed::new(self.columns, resampled, excluded, excluded_dates, stats))
    }
}

/// Report a parse failure at its position in the fitted table.
fn at_input_row(err: DatesError, rows: &[usize]) -> DatesError {
    match err {
        DatesError::Parse(mut parse) => {
            parse.row = rows.get(parse.row).copied().unwrap_or(parse.row);
            DatesError::Parse(parse)
        }
        other => other,
    }
}

/// The result of a transform.
///
/// Holds the resampled rows with calendar dates and the excluded rows as
/// they were prepared, plus both as currently rendered.
#[derive(Debug, Clone)]
pub struct Transformed {
    columns: KeyColumns,
    stats: ResampleStats,
    layout: Option<DateLayout>,
    resampled_dates: DataFrame,
    excluded_input: DataFrame,
    excluded_dates: Vec<Option<Date>>,
    resampled: DataFrame,
    excluded: DataFrame,
}

impl Transformed {
    fn new(
        columns: KeyColumns,
        resampled: DataFrame,
        excluded: DataFrame,
        excluded_dates: Vec<Option<Date>>,
        stats: ResampleStats,
    ) -> Self {
        Self {
            columns,
            stats,
            layout: None,
            resampled_dates: resampled.clone(),
            excluded_input: excluded.clone(),
            excluded_dates,
            resampled,
            excluded,
        }
    }

    /// The key columns.
    #[must_use]
    pub const fn columns(&self) -> &KeyColumns {
        &self.columns
    }

    /// Row accounting of the run.
    #[must_use]
    pub const fn stats(&self) -> ResampleStats {
        self.stats
    }

    /// The active output layout (None while dates are calendar typed).
    #[must_use]
    pub const fn layout(&self) -> Option<DateLayout> {
        self.layout
    }

    /// The resampled rows.
    #[must_use]
    pub const fn resampled(&self) -> &DataFrame {
        &self.resampled
    }

    /// The rows set aside for a missing date or group key.
    ///
    /// Values are as in the input, except that blank date text reads as
    /// null and a date that parses is rendered once a layout is set.
    #[must_use]
    pub const fn excluded(&self) -> &DataFrame {
        &self.excluded
    }

    /// Render the date column of both row sets in `pattern`.
    ///
    /// Rendering always starts from the calendar dates, so repeated calls
    /// never compound. Excluded dates that do not parse keep their text. An
    /// unknown pattern leaves the current rendering in place.
    ///
    /// # Errors
    /// Returns the recoverable `PipelineError::UnknownLayout`, listing the
    /// accepted layouts, when `pattern` is not one of them.
    pub fn change_format(&mut self, pattern: &str) -> Result<&DataFrame, PipelineError> {
        let layout = match DateLayout::from_str(pattern) {
            Ok(layout) => layout,
            Err(err) => {
                warn!(
                    "Ignoring unknown date layout '{}'; valid layouts: {}",
                    pattern,
                    DateLayout::valid_layouts()
                );
                return Err(err.into());
            }
        };

        let date_col = self.columns.date();
        let resampled = format_date_column(&self.resampled_dates, date_col, layout)?;
        let excluded =
            format_date_values(&self.excluded_input, date_col, &self.excluded_dates, layout)?;

        self.resampled = resampled;
        self.excluded = excluded;
        self.layout = Some(layout);

        Ok(&self.resampled)
    }

    /// Go back to calendar typed dates and the excluded rows as prepared.
    pub fn clear_format(&mut self) -> &DataFrame {
        self.resampled = self.resampled_dates.clone();
        self.excluded = self.excluded_input.clone();
        self.layout = None;
        &self.resampled
    }

    /// Resampled rows followed by excluded rows, in their current rendering.
    ///
    /// Without a layout the excluded dates are still input text, so the
    /// resampled dates are written as ISO text (`%Y-%m-%d`) to share the
    /// column.
    ///
    /// # Errors
    /// Returns `PipelineError::Utils` if the two row sets cannot be stacked.
    pub fn append_excluded(&self) -> Result<DataFrame, PipelineError> {
        let date_col = self.columns.date();
        let head_dtype = self.resampled.column(date_col)?.dtype();
        let tail_dtype = self.excluded.column(date_col)?.dtype();

        if head_dtype == tail_dtype {
            return Ok(append_rows(&self.resampled, &self.excluded)?);
        }

        if tail_dtype == &DataType::Null {
            let dates = self.excluded.column(date_col)?.cast(head_dtype)?;
            let mut tail = self.excluded.clone();
            tail.with_column(dates)?;
            return Ok(append_rows(&self.resampled, &tail)?);
        }

        let head = format_date_column(&self.resampled, date_col, DateLayout::YearMonthDayDash)?;
        let dates = self.excluded.column(date_col)?.cast(&DataType::String)?;
        let mut tail = self.excluded.clone();
        tail.with_column(dates)?;
        Ok(append_rows(&head, &tail)?)
    }

    /// Consume the result, returning (resampled, excluded).
    #[must_use]
    pub fn into_parts(self) -> (DataFrame, DataFrame) {
        (self.resampled, self.excluded)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sample() -> DataFrame {
        df! {
            "date" => &[
                Some("20-03-2008"),
                Some("20-03-2011"),
                Some("05-06-2012"),
                Some("05-06-2015"),
                Some("03-03-2016"),
                Some(""),
                Some("   "),
                Some("01-01-2001"),
            ],
            "id" => &[Some(2.0), Some(2.0), Some(2.0), Some(2.0), Some(4.0), Some(4.0), Some(4.0), None],
            "value" => &[10, 11, 12, 13, 40, 41, 42, 99],
        }
        .unwrap()
    }

    fn day_first() -> TransformOptions {
        TransformOptions::new().with_day_first(true)
    }

    fn text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn fit_rejects_missing_column() {
        let err = YearlyResampler::fit(&sample(), "date", "station").unwrap_err();
        assert!(matches!(err, PipelineError::Validation(msg) if msg.contains("station")));
    }

    #[test]
    fn fit_rejects_same_column_twice() {
        let err = YearlyResampler::fit(&sample(), "date", "date").unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[test]
    fn fit_keeps_private_copy() {
        let table = sample();
        let fitted = YearlyResampler::fit(&table, "date", "id").unwrap();
        assert!(fitted.table().equals_missing(&table));
        assert_eq!(fitted.columns(), &KeyColumns::new("date", "id"));
    }

    #[test]
    fn transform_scenario() {
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();

        let stats = run.stats();
        assert_eq!(stats.groups, 2);
        assert_eq!(stats.output_rows(), 9);
        assert_eq!(stats.synthesized, 4);
        assert_eq!(stats.excluded, 3);
        assert!(run.layout().is_none());

        let out = run.resampled();
        assert_eq!(out.column("date").unwrap().dtype(), &DataType::Date);

        let ids: Vec<f64> = out.column("id").unwrap().f64().unwrap().into_no_null_iter().collect();
        assert_eq!(ids.iter().filter(|&&id| id == 4.0).count(), 1);

        let values: Vec<Option<i32>> =
            out.column("value").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(
            values,
            vec![Some(10), None, None, Some(11), Some(12), None, None, Some(13), Some(40)]
        );
    }

    #[test]
    fn transform_with_output_format() {
        let options = day_first().with_output_format("%Y-%m-%d");
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &options).unwrap();

        assert_eq!(run.layout(), Some(DateLayout::YearMonthDayDash));
        let dates = text(run.resampled(), "date");
        assert_eq!(dates.first().cloned().flatten().as_deref(), Some("2008-03-20"));
        assert_eq!(dates.last().cloned().flatten().as_deref(), Some("2016-03-03"));

        // Excluded rows render with the same layout
        assert_eq!(text(run.excluded(), "date"), vec![None, None, Some("2001-01-01".to_string())]);
    }

    #[test]
    fn transform_ignores_unknown_output_format() {
        let options = day_first().with_output_format("%Y%m%d");
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &options).unwrap();

        assert!(run.layout().is_none());
        assert_eq!(run.resampled().column("date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn transform_surfaces_parse_errors() {
        let table = df! {
            "date" => &["20-03-2008", "not a date"],
            "id" => &[1, 1],
        }
        .unwrap();

        let err = YearlyResampler::fit_transform(&table, "date", "id", &day_first()).unwrap_err();
        match err {
            PipelineError::DateParse(e) => {
                assert_eq!(e.value, "not a date");
                assert!(e.rule.contains("day_first=true"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_excluded_date_does_not_block_the_run() {
        let table = df! {
            "date" => &["20-03-2008", "20-03-2010", "not a date"],
            "id" => &[Some(1.0), Some(1.0), None],
            "value" => &[1, 2, 3],
        }
        .unwrap();

        let mut run = YearlyResampler::fit_transform(&table, "date", "id", &day_first()).unwrap();
        assert_eq!(run.resampled().height(), 3);
        assert_eq!(run.stats().excluded, 1);
        assert_eq!(text(run.excluded(), "date"), vec![Some("not a date".to_string())]);

        let all = run.append_excluded().unwrap();
        assert_eq!(all.height(), 4);
        assert_eq!(text(&all, "date")[3].as_deref(), Some("not a date"));
        let values: Vec<Option<i32>> =
            all.column("value").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(values[3], Some(3));

        // Rendering leaves text it cannot read untouched
        run.change_format("%Y-%m-%d").unwrap();
        assert_eq!(text(run.excluded(), "date"), vec![Some("not a date".to_string())]);
        let all = run.append_excluded().unwrap();
        assert_eq!(text(&all, "date")[3].as_deref(), Some("not a date"));
    }

    #[test]
    fn parse_error_reports_input_row() {
        let table = df! {
            "date" => &[Some("20-03-2008"), Some("01-01-2001"), Some(""), Some("31-31-2009")],
            "id" => &[Some(1), None, Some(1), Some(1)],
        }
        .unwrap();

        let err = YearlyResampler::fit_transform(&table, "date", "id", &day_first()).unwrap_err();
        match err {
            PipelineError::DateParse(e) => {
                assert_eq!(e.row, 3);
                assert_eq!(e.value, "31-31-2009");
                assert!(e.to_string().contains("at row 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("value")]
    #[case("date")]
    #[case("id")]
    fn observed_flag_must_be_a_new_column(#[case] flag: &str) {
        let options = day_first().with_observed_flag(flag);
        let err = YearlyResampler::fit_transform(&sample(), "date", "id", &options).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(msg) if msg.contains(flag)));
    }

    #[test]
    fn transform_with_explicit_pattern() {
        let table = df! {
            "date" => &["2008|03|20", "2010|03|20"],
            "id" => &["a", "a"],
        }
        .unwrap();

        let options = TransformOptions::new().with_parse_pattern("%Y|%m|%d");
        let run = YearlyResampler::fit_transform(&table, "date", "id", &options).unwrap();
        assert_eq!(run.resampled().height(), 3);
    }

    #[test]
    fn change_format_is_idempotent_and_rerenders() {
        let mut run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();

        let first = text(run.change_format("%d/%m/%Y").unwrap(), "date");
        let second = text(run.change_format("%d/%m/%Y").unwrap(), "date");
        assert_eq!(first, second);
        assert_eq!(first[1].as_deref(), Some("20/03/2009"));

        let switched = text(run.change_format("%m-%d-%Y").unwrap(), "date");
        assert_eq!(switched[1].as_deref(), Some("03-20-2009"));
        assert_eq!(run.layout(), Some(DateLayout::MonthDayYearDash));
    }

    #[test]
    fn change_format_rejects_unknown_layout_without_side_effects() {
        let mut run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();
        run.change_format("%Y-%m-%d").unwrap();
        let before = run.resampled().clone();

        let err = run.change_format("%B %Y").unwrap_err();
        assert!(err.is_recoverable());
        match err {
            PipelineError::UnknownLayout { given, valid } => {
                assert_eq!(given, "%B %Y");
                assert_eq!(valid.split(", ").count(), 8);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(run.resampled().equals_missing(&before));
        assert_eq!(run.layout(), Some(DateLayout::YearMonthDayDash));
    }

    #[test]
    fn clear_format_restores_calendar_dates() {
        let mut run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();
        run.change_format("%Y-%m-%d").unwrap();

        let out = run.clear_format();
        assert_eq!(out.column("date").unwrap().dtype(), &DataType::Date);
        assert!(run.layout().is_none());
    }

    #[test]
    fn append_excluded_puts_excluded_rows_last() {
        let mut run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();
        run.change_format("%d-%m-%Y").unwrap();

        let all = run.append_excluded().unwrap();
        assert_eq!(all.height(), 12);

        let values: Vec<Option<i32>> =
            all.column("value").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(&values[9..], &[Some(41), Some(42), Some(99)]);

        let ids: Vec<Option<f64>> = all.column("id").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(&ids[9..], &[Some(4.0), Some(4.0), None]);

        let dates = text(&all, "date");
        assert_eq!(dates[11].as_deref(), Some("01-01-2001"));
    }

    #[test]
    fn append_excluded_without_layout_keeps_input_text() {
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();
        assert_eq!(run.excluded().column("date").unwrap().dtype(), &DataType::String);

        let all = run.append_excluded().unwrap();
        let dates = text(&all, "date");
        assert_eq!(dates[0].as_deref(), Some("2008-03-20"));
        assert_eq!(dates[11].as_deref(), Some("01-01-2001"));
    }

    #[test]
    fn append_excluded_with_calendar_input() {
        let ymd = |y, m, d| Date::from_ymd_opt(y, m, d);
        let table = DataFrame::new(vec![
            Column::new("date".into(), vec![ymd(2000, 5, 1), ymd(2002, 5, 1), ymd(1999, 1, 1)]),
            Column::new("id".into(), vec![Some(1), Some(1), None]),
        ])
        .unwrap();

        let run = YearlyResampler::fit_transform(&table, "date", "id", &TransformOptions::new())
            .unwrap();
        let all = run.append_excluded().unwrap();

        assert_eq!(all.column("date").unwrap().dtype(), &DataType::Date);
        let last = all.column("date").unwrap().get(3).unwrap();
        let expected = annualize_primitives::epoch_days(ymd(1999, 1, 1).unwrap());
        assert_eq!(last, AnyValue::Date(expected));
    }

    #[test]
    fn observed_flag_survives_append() {
        let options = day_first().with_observed_flag("observed");
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &options).unwrap();

        let all = run.append_excluded().unwrap();
        let flags: Vec<Option<bool>> =
            all.column("observed").unwrap().bool().unwrap().into_iter().collect();
        assert_eq!(flags.iter().filter(|f| **f == Some(true)).count(), 5);
        assert_eq!(flags.iter().filter(|f| f.is_none()).count(), 3);
    }

    #[test]
    fn transform_all_rows_excluded() {
        let table = df! {
            "date" => &[Some(""), None],
            "id" => &[Some(1), None],
        }
        .unwrap();

        let run = YearlyResampler::fit_transform(&table, "date", "id", &day_first()).unwrap();
        assert_eq!(run.resampled().height(), 0);
        assert_eq!(run.excluded().height(), 2);
        assert_eq!(run.append_excluded().unwrap().height(), 2);
    }

    #[test]
    fn into_parts_returns_both_sets() {
        let run = YearlyResampler::fit_transform(&sample(), "date", "id", &day_first()).unwrap();
        let (resampled, excluded) = run.into_parts();
        assert_eq!(resampled.height(), 9);
        assert_eq!(excluded.height(), 3);
    }
}

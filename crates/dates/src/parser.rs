//! Hint-driven date parsing.

use annualize_primitives::{Date, ParseHints};
use annualize_traits::DateParser;
use chrono::{NaiveDateTime, NaiveTime};

/// Layouts with a month name, tried after purely numeric text fails.
const NAMED_MONTH_FORMATS: [&str; 7] =
    ["%d %b %Y", "%d-%b-%Y", "%d/%b/%Y", "%b %d %Y", "%b %d, %Y", "%Y-%b-%d", "%d.%b.%Y"];

/// Time-of-day suffixes that may follow a date and are discarded.
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Field order of a numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    YearMonthDay,
    YearDayMonth,
    MonthDayYear,
    DayMonthYear,
}

impl FieldOrder {
    fn build(self, fields: [&str; 3]) -> Option<Date> {
        let [a, b, c] = fields;
        let (year, month, day) = match self {
            Self::YearMonthDay => (a, b, c),
            Self::YearDayMonth => (a, c, b),
            Self::MonthDayYear => (c, a, b),
            Self::DayMonthYear => (c, b, a),
        };
        Date::from_ymd_opt(expand_year(year)?, month.parse().ok()?, day.parse().ok()?)
    }
}

/// Read a year field, widening two-digit years with the POSIX pivot
/// (00-68 to 2000s, 69-99 to 1900s).
fn expand_year(field: &str) -> Option<i32> {
    let year: i32 = field.parse().ok()?;
    match field.len() {
        1 | 2 if year < 69 => Some(2000 + year),
        1 | 2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

/// Split numeric date text into exactly three digit-only fields.
fn numeric_fields(text: &str) -> Option<[&str; 3]> {
    let mut parts = text.split(['/', '-', '.', ' ']).filter(|p| !p.is_empty());
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || !fields.iter().all(|f| f.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(fields)
}

/// Drop a trailing time of day (`2008-03-20T10:00:00`, `03/20/2008 10:00`).
fn strip_time(text: &str) -> &str {
    let Some((head, tail)) = text.split_once(['T', ' ']) else {
        return text;
    };
    let tail = tail.trim().trim_end_matches('Z');
    if TIME_FORMATS.iter().any(|fmt| NaiveTime::parse_from_str(tail, fmt).is_ok()) {
        head
    } else {
        text
    }
}

/// Parses date text according to [`ParseHints`].
///
/// With an explicit pattern only that pattern is tried. Otherwise numeric
/// dates are read with a four-digit year wherever it appears first or last,
/// the remaining fields ordered by the hints (month before day by default).
/// When the preferred order gives an impossible date the swapped month/day
/// order is tried, so `20-03-2008` still reads as March 20 without
/// `day_first`. Month names and a trailing time of day are accepted.
#[derive(Debug, Clone, Default)]
pub struct HintedParser {
    hints: ParseHints,
}

impl HintedParser {
    /// Create a parser for the given hints.
    #[must_use]
    pub const fn new(hints: ParseHints) -> Self {
        Self { hints }
    }

    /// The active hints.
    #[must_use]
    pub const fn hints(&self) -> &ParseHints {
        &self.hints
    }

    fn orders(&self, fields: [&str; 3]) -> [FieldOrder; 2] {
        let day_first = self.hints.day_first;
        let year_leads = match (fields[0].len(), fields[2].len()) {
            (4, _) => true,
            (_, 4) => false,
            _ => self.hints.year_first,
        };

        match (year_leads, day_first) {
            (true, false) => [FieldOrder::YearMonthDay, FieldOrder::YearDayMonth],
            (true, true) => [FieldOrder::YearDayMonth, FieldOrder::YearMonthDay],
            (false, false) => [FieldOrder::MonthDayYear, FieldOrder::DayMonthYear],
            (false, true) => [FieldOrder::DayMonthYear, FieldOrder::MonthDayYear],
        }
    }

    fn parse_heuristic(&self, text: &str) -> Option<Date> {
        let date_text = strip_time(text);

        if let Some(fields) = numeric_fields(date_text) {
            // A four-digit year in the middle position is never valid
            if fields[1].len() > 2 {
                return None;
            }
            return self.orders(fields).into_iter().find_map(|order| order.build(fields));
        }

        NAMED_MONTH_FORMATS.iter().find_map(|fmt| Date::parse_from_str(date_text, fmt).ok())
    }
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<Date> {
    Date::parse_from_str(text, pattern)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, pattern).ok().map(|dt| dt.date()))
}

impl DateParser for HintedParser {
    fn parse(&self, text: &str) -> Option<Date> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        match self.hints.pattern() {
            Some(pattern) => parse_with_pattern(trimmed, pattern),
            None => self.parse_heuristic(trimmed),
        }
    }

    fn rule(&self) -> String {
        match self.hints.pattern() {
            Some(pattern) => format!("pattern '{pattern}'"),
            None => format!(
                "inferred layout (day_first={}, year_first={})",
                self.hints.day_first, self.hints.year_first
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn parser(day_first: bool, year_first: bool) -> HintedParser {
        HintedParser::new(
            ParseHints::new().with_day_first(day_first).with_year_first(year_first),
        )
    }

    #[rstest]
    #[case("03-04-2016", false, false, ymd(2016, 3, 4))]
    #[case("03-04-2016", true, false, ymd(2016, 4, 3))]
    #[case("20-03-2008", true, false, ymd(2008, 3, 20))]
    #[case("05/06/2012", true, false, ymd(2012, 6, 5))]
    #[case("2008-03-20", false, false, ymd(2008, 3, 20))]
    #[case("2008/20/03", true, false, ymd(2008, 3, 20))]
    #[case("2008.03.20", false, false, ymd(2008, 3, 20))]
    #[case("08-03-20", false, true, ymd(2008, 3, 20))]
    #[case("08-20-03", true, true, ymd(2008, 3, 20))]
    #[case("03/20/99", false, false, ymd(1999, 3, 20))]
    fn heuristic_orders(
        #[case] text: &str,
        #[case] day_first: bool,
        #[case] year_first: bool,
        #[case] expected: Date,
    ) {
        assert_eq!(parser(day_first, year_first).parse(text), Some(expected));
    }

    #[test]
    fn heuristic_swaps_impossible_month() {
        // Month-first by default, but 20 cannot be a month
        assert_eq!(parser(false, false).parse("20-03-2008"), Some(ymd(2008, 3, 20)));
    }

    #[rstest]
    #[case("20 Mar 2008")]
    #[case("20-Mar-2008")]
    #[case("March 20, 2008")]
    #[case("2008-03-20T10:15:00")]
    #[case("2008-03-20 10:15")]
    #[case("03/20/2008 10:15:00.250")]
    #[case("  2008-03-20  ")]
    fn heuristic_accepts_named_months_and_times(#[case] text: &str) {
        assert_eq!(parser(false, false).parse(text), Some(ymd(2008, 3, 20)));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a date")]
    #[case("31-02-2020")]
    #[case("2020-13-45")]
    #[case("12-2020-03")]
    #[case("2020-03")]
    #[case("1-2-3-4")]
    fn heuristic_rejects(#[case] text: &str) {
        assert_eq!(parser(true, false).parse(text), None);
    }

    #[test]
    fn explicit_pattern_takes_precedence() {
        let hints = ParseHints::new().with_day_first(false).with_pattern("%d-%m-%Y");
        let parser = HintedParser::new(hints);
        assert_eq!(parser.parse("03-04-2016"), Some(ymd(2016, 4, 3)));
        // No heuristic fallback under a pattern
        assert_eq!(parser.parse("2016-04-03"), None);
    }

    #[test]
    fn explicit_pattern_with_time() {
        let parser = HintedParser::new(ParseHints::new().with_pattern("%Y/%m/%d %H:%M"));
        assert_eq!(parser.parse("2016/04/03 09:30"), Some(ymd(2016, 4, 3)));
    }

    #[test]
    fn rule_descriptions() {
        assert_eq!(
            parser(true, false).rule(),
            "inferred layout (day_first=true, year_first=false)"
        );
        let parser = HintedParser::new(ParseHints::new().with_pattern("%d/%m/%Y"));
        assert_eq!(parser.rule(), "pattern '%d/%m/%Y'");
    }

    #[test]
    fn parse_at_reports_rule() {
        let err = parser(false, false).parse_at(2, "garbage").unwrap_err();
        assert_eq!(err.row, 2);
        assert!(err.rule.starts_with("inferred layout"));
    }
}

/// Strategy resolution: maps an operation name to a path-derivation function.
///
/// Each strategy is a small pure function from a [`MediaRecord`] to the
/// directory segments the record should be placed under.
///
/// # Examples
///
/// ```
/// use sortphotos::strategy::{Operation, ordinal_suffix};
///
/// let op: Operation = "NUM_DAY_NEST".parse().unwrap();
/// assert_eq!(op, Operation::NumDayNest);
/// assert_eq!(op.name(), "num_day_nest");
/// assert_eq!(ordinal_suffix(22), "nd");
/// ```
use crate::error::SortError;
use crate::scanner::MediaRecord;
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Ordered directory segments forming a destination subpath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Joins the segments onto `root`.
    pub fn join_onto(&self, root: &Path) -> PathBuf {
        self.0.iter().fold(root.to_path_buf(), |path, s| path.join(s))
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl<S: Into<String>> FromIterator<S> for RelativePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A pure path-derivation function.
pub type Strategy = fn(&MediaRecord) -> RelativePath;

/// The closed set of sorting operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `YYYY-MM-DD`
    NumDay,
    /// `YYYY/M/D`
    NumDayNest,
    /// `YYYY-MM`
    NumMonth,
    /// `YYYY/M`
    NumMonthNest,
    /// `YYYY`
    NumYear,
    /// `YYYY/MonthName/WeekdayName`
    NamedMonthDay,
    /// `YYYY/MonthName/Dth`
    NamedMonthFormattedDay,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::NumDay,
        Operation::NumDayNest,
        Operation::NumMonth,
        Operation::NumMonthNest,
        Operation::NumYear,
        Operation::NamedMonthDay,
        Operation::NamedMonthFormattedDay,
    ];

    /// Returns the command-line name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::NumDay => "num_day",
            Operation::NumDayNest => "num_day_nest",
            Operation::NumMonth => "num_month",
            Operation::NumMonthNest => "num_month_nest",
            Operation::NumYear => "num_year",
            Operation::NamedMonthDay => "named_month_day",
            Operation::NamedMonthFormattedDay => "named_month_formatted_day",
        }
    }

    /// Returns a human-readable description of the layout produced.
    pub fn description(&self) -> &'static str {
        match self {
            Operation::NumDay => "one folder per day (2023-03-05)",
            Operation::NumDayNest => "year/month/day folders (2023/3/5)",
            Operation::NumMonth => "one folder per month (2023-03)",
            Operation::NumMonthNest => "year/month folders (2023/3)",
            Operation::NumYear => "one folder per year (2023)",
            Operation::NamedMonthDay => "year/month name/weekday (2023/March/Sunday)",
            Operation::NamedMonthFormattedDay => "year/month name/ordinal day (2023/March/5th)",
        }
    }

    /// Returns the path-derivation function bound to this operation.
    pub fn strategy(&self) -> Strategy {
        match self {
            Operation::NumDay => num_day,
            Operation::NumDayNest => num_day_nest,
            Operation::NumMonth => num_month,
            Operation::NumMonthNest => num_month_nest,
            Operation::NumYear => num_year,
            Operation::NamedMonthDay => named_month_day,
            Operation::NamedMonthFormattedDay => named_month_formatted_day,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Operation::name).collect()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = SortError;

    /// Case-insensitive lookup over [`Operation::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| SortError::InvalidOperation {
                name: s.to_string(),
            })
    }
}

/// English ordinal suffix for a day of the month.
///
/// Only 1/21/31, 2/22 and 3/23 get "st", "nd" and "rd"; every other day
/// (11, 12 and 13 included) gets "th".
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

fn year(record: &MediaRecord) -> String {
    record.creation_date.format("%Y").to_string()
}

fn num_year(record: &MediaRecord) -> RelativePath {
    RelativePath::new(vec![year(record)])
}

fn num_month(record: &MediaRecord) -> RelativePath {
    RelativePath::new(vec![record.creation_date.format("%Y-%m").to_string()])
}

fn num_month_nest(record: &MediaRecord) -> RelativePath {
    RelativePath::new(vec![
        year(record),
        record.creation_date.month().to_string(),
    ])
}

fn num_day(record: &MediaRecord) -> RelativePath {
    RelativePath::new(vec![record.creation_date.format("%Y-%m-%d").to_string()])
}

fn num_day_nest(record: &MediaRecord) -> RelativePath {
    let date = &record.creation_date;
    RelativePath::new(vec![
        year(record),
        date.month().to_string(),
        date.day().to_string(),
    ])
}

fn named_month_day(record: &MediaRecord) -> RelativePath {
    let date = &record.creation_date;
    RelativePath::new(vec![
        year(record),
        date.format("%B").to_string(),
        date.format("%A").to_string(),
    ])
}

fn named_month_formatted_day(record: &MediaRecord) -> RelativePath {
    let date = &record.creation_date;
    let day = date.day();
    RelativePath::new(vec![
        year(record),
        date.format("%B").to_string(),
        format!("{}{}", day, ordinal_suffix(day)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::tests::record_created_on;

    fn derive(op: Operation, y: i32, m: u32, d: u32) -> Vec<String> {
        let record = record_created_on(y, m, d);
        (op.strategy())(&record).segments().to_vec()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "Named_Month_Day".parse::<Operation>().unwrap(),
            Operation::NamedMonthDay
        );
        assert_eq!("num_year".parse::<Operation>().unwrap(), Operation::NumYear);
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = "fol_day".parse::<Operation>().unwrap_err();
        assert!(matches!(err, SortError::InvalidOperation { ref name } if name == "fol_day"));
    }

    #[test]
    fn test_names_round_trip_through_parse() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_num_year_and_month() {
        assert_eq!(derive(Operation::NumYear, 2023, 3, 5), vec!["2023"]);
        assert_eq!(derive(Operation::NumMonth, 2023, 3, 5), vec!["2023-03"]);
        assert_eq!(derive(Operation::NumMonthNest, 2023, 3, 5), vec!["2023", "3"]);
    }

    #[test]
    fn test_flat_day_is_padded_nested_is_not() {
        assert_eq!(derive(Operation::NumDay, 2023, 3, 5), vec!["2023-03-05"]);
        assert_eq!(
            derive(Operation::NumDayNest, 2023, 3, 5),
            vec!["2023", "3", "5"]
        );
    }

    #[test]
    fn test_named_month_day() {
        // 2023-03-21 was a Tuesday
        assert_eq!(
            derive(Operation::NamedMonthDay, 2023, 3, 21),
            vec!["2023", "March", "Tuesday"]
        );
    }

    #[test]
    fn test_named_month_formatted_day() {
        assert_eq!(
            derive(Operation::NamedMonthFormattedDay, 2023, 3, 21),
            vec!["2023", "March", "21st"]
        );
        assert_eq!(
            derive(Operation::NamedMonthFormattedDay, 2023, 12, 3),
            vec!["2023", "December", "3rd"]
        );
    }

    #[test]
    fn test_ordinal_suffixes() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(format!("{}{}", day, ordinal_suffix(day)), expected);
        }
    }

    #[test]
    fn test_strategies_are_deterministic() {
        let record = record_created_on(2024, 2, 29);
        for op in Operation::ALL {
            let strategy = op.strategy();
            assert_eq!(strategy(&record), strategy(&record), "{}", op);
        }
    }

    #[test]
    fn test_relative_path_join_and_display() {
        let rel: RelativePath = ["2023", "March", "3rd"].into_iter().collect();
        assert_eq!(rel.to_string(), "2023/March/3rd");
        assert_eq!(
            rel.join_onto(Path::new("/out")),
            PathBuf::from("/out/2023/March/3rd")
        );
    }
}

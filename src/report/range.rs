//! Month-to-date-range resolution for the report and listing endpoints.

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use crate::Error;

/// The query string shared by the report endpoints.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// The calendar month to report on, 1 through 12.
    pub month: Option<i64>,
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The last date in the range.
    pub end: Date,
}

/// Resolve a month number to the first and last day of that month in the
/// current year (UTC).
///
/// All routes accept the same 1-indexed month convention, so a missing or
/// out-of-range value is rejected here before any query runs.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is `None` or outside 1 through 12.
pub fn resolve_month(month: Option<i64>) -> Result<DateRange, Error> {
    month_range_in_year(month, OffsetDateTime::now_utc().year())
}

pub(crate) fn month_range_in_year(month: Option<i64>, year: i32) -> Result<DateRange, Error> {
    let number = month.ok_or(Error::InvalidMonth(None))?;
    let month = month_from_number(number).ok_or(Error::InvalidMonth(Some(number)))?;

    Ok(month_bounds(year, month))
}

fn month_bounds(year: i32, month: Month) -> DateRange {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    DateRange { start, end }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn month_from_number(month: i64) -> Option<Month> {
    match month {
        1 => Some(Month::January),
        2 => Some(Month::February),
        3 => Some(Month::March),
        4 => Some(Month::April),
        5 => Some(Month::May),
        6 => Some(Month::June),
        7 => Some(Month::July),
        8 => Some(Month::August),
        9 => Some(Month::September),
        10 => Some(Month::October),
        11 => Some(Month::November),
        12 => Some(Month::December),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::{DateRange, month_range_in_year, resolve_month};

    #[test]
    fn resolves_first_and_last_day_of_every_month() {
        let last_days = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

        for month in 1..=12_i64 {
            let got = month_range_in_year(Some(month), 2023).unwrap();

            assert_eq!(got.start.day(), 1);
            assert_eq!(got.start.month() as i64, month);
            assert_eq!(got.end.day(), last_days[month as usize - 1]);
            assert_eq!(got.end.month() as i64, month);
        }
    }

    #[test]
    fn resolves_leap_year_february() {
        let got = month_range_in_year(Some(2), 2024).unwrap();

        assert_eq!(
            got,
            DateRange {
                start: date!(2024 - 02 - 01),
                end: date!(2024 - 02 - 29),
            }
        );
    }

    #[test]
    fn rejects_out_of_range_months() {
        for month in [0, 13, -1, 100] {
            let got = month_range_in_year(Some(month), 2024);

            assert_eq!(got, Err(Error::InvalidMonth(Some(month))));
        }
    }

    #[test]
    fn rejects_missing_month() {
        let got = resolve_month(None);

        assert_eq!(got, Err(Error::InvalidMonth(None)));
    }
}

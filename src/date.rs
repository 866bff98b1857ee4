//! Ordinal date encoding.
//!
//! Articles are dated with a compact `YYYY.DDD` string: the year, a dot, and
//! the day of the year zero-padded to three digits (Jan 1 is day `001`). The
//! same string prefixes article filenames and orders articles on the site.
//!
//! ```text
//! Feb 9 2012   →  2012.040      (31 days of January + 9)
//! Mar 1 2012   →  2012.061      (leap year: February has 29 days)
//! Mar 1 2013   →  2013.060
//! ```
//!
//! Leap days only shift ordinals for dates on or after March 1.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("Ordinal date {0:?} has no '.' separator")]
    MissingSeparator(String),
    #[error("Ordinal date {0:?} must be YEAR.DAY with integer parts")]
    InvalidNumber(String),
    #[error("Day {day} is out of range for year {year}")]
    OutOfRange { year: i32, day: u32 },
    #[error("Unrecognized date {0:?} (expected YYYY.DDD or a date like \"Feb 9 2012\")")]
    InvalidHuman(String),
}

/// Largest day offset accepted before walking the calendar.
const MAX_DAY_OF_YEAR: u32 = 366;

/// Formats tried, in order, for human-written dates.
const HUMAN_FORMATS: &[&str] = &["%b %d %Y", "%B %d %Y"];

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Encode a calendar date as `YYYY.DDD`.
pub fn date_to_ordinal(date: NaiveDate) -> String {
    let preceding: u32 = (1..date.month())
        .map(|month| days_in_month(date.year(), month))
        .sum();
    format!("{:04}.{:03}", date.year(), preceding + date.day())
}

/// Decode a `YYYY.DDD` string back into a calendar date.
///
/// Walks the months from January, subtracting each month's length until the
/// remaining offset fits inside the current month.
pub fn ordinal_to_date(ordinal: &str) -> Result<NaiveDate, DateError> {
    let (year, day) = ordinal
        .trim()
        .split_once('.')
        .ok_or_else(|| DateError::MissingSeparator(ordinal.to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| DateError::InvalidNumber(ordinal.to_string()))?;
    let day: u32 = day
        .parse()
        .map_err(|_| DateError::InvalidNumber(ordinal.to_string()))?;

    let out_of_range = DateError::OutOfRange { year, day };
    if day > MAX_DAY_OF_YEAR {
        return Err(out_of_range);
    }

    let mut remaining = day;
    for month in 1..=12 {
        let length = days_in_month(year, month);
        if remaining <= length {
            return NaiveDate::from_ymd_opt(year, month, remaining).ok_or(out_of_range);
        }
        remaining -= length;
    }
    Err(out_of_range)
}

/// Parse a human-written date such as `Feb 9 2012` or `February 9, 2012`.
pub fn parse_human_date(input: &str) -> Result<NaiveDate, DateError> {
    let cleaned = input.replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    HUMAN_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
        .ok_or_else(|| DateError::InvalidHuman(input.to_string()))
}

/// Accept either an ordinal or a human date and return the normalized ordinal.
///
/// Input containing a `.` is treated as an ordinal and must decode; anything
/// else goes through [`parse_human_date`].
pub fn parse_date_input(input: &str) -> Result<String, DateError> {
    let date = if input.contains('.') {
        ordinal_to_date(input)?
    } else {
        parse_human_date(input)?
    };
    Ok(date_to_ordinal(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2012));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2013));
        assert!(!is_leap_year(1900));
    }

    #[test]
    fn february_length_follows_leap_rule() {
        assert_eq!(days_in_month(2012, 2), 29);
        assert_eq!(days_in_month(2013, 2), 28);
        assert_eq!(days_in_month(2013, 13), 0);
    }

    #[test]
    fn human_date_encodes_to_ordinal() {
        let date = parse_human_date("Feb 9 2012").unwrap();
        assert_eq!(date_to_ordinal(date), "2012.040");
    }

    #[test]
    fn leap_day_does_not_shift_early_february() {
        assert_eq!(date_to_ordinal(ymd(2013, 2, 9)), "2013.040");
        assert_eq!(date_to_ordinal(ymd(2012, 2, 9)), "2012.040");
    }

    #[test]
    fn leap_day_shifts_march_onwards() {
        assert_eq!(date_to_ordinal(ymd(2012, 3, 1)), "2012.061");
        assert_eq!(date_to_ordinal(ymd(2013, 3, 1)), "2013.060");
        assert_eq!(date_to_ordinal(ymd(2012, 12, 31)), "2012.366");
        assert_eq!(date_to_ordinal(ymd(2013, 12, 31)), "2013.365");
    }

    #[test]
    fn first_day_is_one() {
        assert_eq!(date_to_ordinal(ymd(2020, 1, 1)), "2020.001");
        assert_eq!(ordinal_to_date("2020.001").unwrap(), ymd(2020, 1, 1));
    }

    #[test]
    fn every_day_round_trips() {
        for year in [2012, 2013] {
            let mut date = ymd(year, 1, 1);
            while date.year() == year {
                let ordinal = date_to_ordinal(date);
                assert_eq!(ordinal_to_date(&ordinal).unwrap(), date, "{ordinal}");
                date = date.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn unpadded_day_decodes() {
        assert_eq!(ordinal_to_date("2012.40").unwrap(), ymd(2012, 2, 9));
    }

    #[test]
    fn missing_separator_is_error() {
        assert_eq!(
            ordinal_to_date("2012040"),
            Err(DateError::MissingSeparator("2012040".to_string()))
        );
    }

    #[test]
    fn non_integer_parts_are_error() {
        assert!(matches!(
            ordinal_to_date("twelve.040"),
            Err(DateError::InvalidNumber(_))
        ));
        assert!(matches!(
            ordinal_to_date("2012.4O"),
            Err(DateError::InvalidNumber(_))
        ));
        assert!(matches!(
            ordinal_to_date("2012.040.1"),
            Err(DateError::InvalidNumber(_))
        ));
    }

    #[test]
    fn offset_past_366_is_error() {
        assert_eq!(
            ordinal_to_date("2012.367"),
            Err(DateError::OutOfRange {
                year: 2012,
                day: 367
            })
        );
    }

    #[test]
    fn day_366_only_valid_in_leap_year() {
        assert_eq!(ordinal_to_date("2012.366").unwrap(), ymd(2012, 12, 31));
        assert!(matches!(
            ordinal_to_date("2013.366"),
            Err(DateError::OutOfRange { .. })
        ));
    }

    #[test]
    fn day_zero_is_error() {
        assert!(matches!(
            ordinal_to_date("2012.000"),
            Err(DateError::OutOfRange { day: 0, .. })
        ));
    }

    #[test]
    fn human_date_variants() {
        assert_eq!(parse_human_date("Feb 09 2012").unwrap(), ymd(2012, 2, 9));
        assert_eq!(
            parse_human_date("February 9, 2012").unwrap(),
            ymd(2012, 2, 9)
        );
        assert_eq!(parse_human_date("  Dec   31 2013 ").unwrap(), ymd(2013, 12, 31));
    }

    #[test]
    fn human_date_rejects_garbage() {
        assert!(matches!(
            parse_human_date("yesterday"),
            Err(DateError::InvalidHuman(_))
        ));
        assert!(matches!(
            parse_human_date("Feb 30 2012"),
            Err(DateError::InvalidHuman(_))
        ));
    }

    #[test]
    fn date_input_accepts_both_forms() {
        assert_eq!(parse_date_input("Feb 9 2012").unwrap(), "2012.040");
        assert_eq!(parse_date_input("2012.040").unwrap(), "2012.040");
        assert_eq!(parse_date_input("2012.40").unwrap(), "2012.040");
    }

    #[test]
    fn date_input_reports_ordinal_errors() {
        assert!(matches!(
            parse_date_input("2012.400"),
            Err(DateError::OutOfRange { .. })
        ));
    }
}

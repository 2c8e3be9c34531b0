//! Calendar arithmetic seam over chrono.
//!
//! Parsing, validity, and unit-based add/subtract all delegate to chrono;
//! nothing here redefines calendar rules. Month and year shifts clamp to the
//! end of the target month (chrono's `checked_add_months` behavior).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::TravelerError;

/// A calendar granularity used to advance a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl FromStr for TimeUnit {
    type Err = TravelerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" | "years" => Ok(TimeUnit::Years),
            "month" | "months" => Ok(TimeUnit::Months),
            "week" | "weeks" => Ok(TimeUnit::Weeks),
            "day" | "days" => Ok(TimeUnit::Days),
            "hour" | "hours" => Ok(TimeUnit::Hours),
            "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "second" | "seconds" => Ok(TimeUnit::Seconds),
            _ => Err(TravelerError::UnsupportedUnit {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        };
        write!(f, "{name}")
    }
}

/// Parse an ISO-8601 date or date-time string into a timestamp.
///
/// Accepts `YYYY-MM-DD` (midnight assumed) and `YYYY-MM-DDTHH:MM:SS`, with a
/// space also accepted as the date/time separator. Returns `None` for
/// anything else, including internally inconsistent dates such as a
/// day-of-month overflow.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Shift a timestamp by `amount` units, forward or backward.
///
/// Returns `None` when the result falls outside chrono's representable
/// range. Month and year arithmetic clamps day-of-month, so shifting
/// 2016-01-31 by one month yields 2016-02-29.
pub fn shift(time: NaiveDateTime, amount: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Years => shift_months(time, amount.checked_mul(12)?),
        TimeUnit::Months => shift_months(time, amount),
        TimeUnit::Weeks => Duration::try_weeks(amount).and_then(|d| time.checked_add_signed(d)),
        TimeUnit::Days => Duration::try_days(amount).and_then(|d| time.checked_add_signed(d)),
        TimeUnit::Hours => Duration::try_hours(amount).and_then(|d| time.checked_add_signed(d)),
        TimeUnit::Minutes => {
            Duration::try_minutes(amount).and_then(|d| time.checked_add_signed(d))
        }
        TimeUnit::Seconds => {
            Duration::try_seconds(amount).and_then(|d| time.checked_add_signed(d))
        }
    }
}

fn shift_months(time: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        time.checked_add_months(chrono::Months::new(magnitude))
    } else {
        time.checked_sub_months(chrono::Months::new(magnitude))
    }
}

/// Render a timestamp for output: date-only at midnight, otherwise the full
/// ISO date-time.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    if time.time() == NaiveTime::MIN {
        time.format("%Y-%m-%d").to_string()
    } else {
        time.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn parses_date_only() {
        assert_eq!(parse_timestamp("2016-10-31"), Some(at(2016, 10, 31)));
    }

    #[test]
    fn parses_date_time_with_t_separator() {
        let dt = parse_timestamp("2016-10-31T06:30:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2016, 10, 31).unwrap());
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    }

    #[test]
    fn parses_date_time_with_space_separator() {
        assert!(parse_timestamp("2016-10-31 06:30:00").is_some());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_timestamp("  2016-10-31 "), Some(at(2016, 10, 31)));
    }

    #[test]
    fn rejects_day_of_month_overflow() {
        assert_eq!(parse_timestamp("2016-02-30"), None);
        assert_eq!(parse_timestamp("2015-02-29"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("true"), None);
        assert_eq!(parse_timestamp("31/10/2016"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn unit_parses_singular_and_plural() {
        assert_eq!("day".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!("Months".parse::<TimeUnit>().unwrap(), TimeUnit::Months);
        assert_eq!(" years ".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let err = "fortnights".parse::<TimeUnit>().unwrap_err();
        assert!(matches!(
            err,
            TravelerError::UnsupportedUnit { name } if name == "fortnights"
        ));
    }

    #[test]
    fn unit_display_round_trips() {
        for unit in [
            TimeUnit::Years,
            TimeUnit::Months,
            TimeUnit::Weeks,
            TimeUnit::Days,
            TimeUnit::Hours,
            TimeUnit::Minutes,
            TimeUnit::Seconds,
        ] {
            assert_eq!(unit.to_string().parse::<TimeUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn shift_days_forward_and_back() {
        let start = at(2016, 10, 31);
        let later = shift(start, 5, TimeUnit::Days).unwrap();
        assert_eq!(later, at(2016, 11, 5));
        assert_eq!(shift(later, -5, TimeUnit::Days).unwrap(), start);
    }

    #[test]
    fn shift_months_clamps_month_end() {
        assert_eq!(
            shift(at(2016, 1, 31), 1, TimeUnit::Months).unwrap(),
            at(2016, 2, 29)
        );
        assert_eq!(
            shift(at(2015, 1, 31), 1, TimeUnit::Months).unwrap(),
            at(2015, 2, 28)
        );
    }

    #[test]
    fn shift_years_clamps_leap_day() {
        assert_eq!(
            shift(at(2016, 2, 29), 1, TimeUnit::Years).unwrap(),
            at(2017, 2, 28)
        );
    }

    #[test]
    fn shift_preserves_time_of_day() {
        let start = NaiveDate::from_ymd_opt(2016, 10, 31)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(13, 45, 10).unwrap());
        let shifted = shift(start, 2, TimeUnit::Hours).unwrap();
        assert_eq!(shifted.time(), NaiveTime::from_hms_opt(15, 45, 10).unwrap());
    }

    #[test]
    fn shift_out_of_range_is_none() {
        assert_eq!(shift(at(2016, 1, 1), i64::MAX, TimeUnit::Days), None);
        assert_eq!(shift(at(2016, 1, 1), i64::MAX, TimeUnit::Years), None);
    }

    #[test]
    fn formats_midnight_as_date_only() {
        assert_eq!(format_timestamp(at(2016, 11, 5)), "2016-11-05");
    }

    #[test]
    fn formats_time_of_day_in_full() {
        let dt = NaiveDate::from_ymd_opt(2016, 11, 5)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(format_timestamp(dt), "2016-11-05T06:00:00");
    }
}

//! Time utilities: parsing HH:MM[:SS], minute-of-day arithmetic, formatting.
//!
//! All times are venue wall-clock times. Nothing here converts timezones.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// Parse a clock value, naming `field` in the error when it is malformed.
pub fn parse_clock(field: &'static str, t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| {
        AppError::validation(field, format!("'{}' is not a HH:MM or HH:MM:SS time", t))
    })
}

pub fn parse_optional_clock(
    field: &'static str,
    input: Option<&String>,
) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_clock(field, s)).transpose()
}

/// Minutes since midnight. Seconds are truncated.
pub fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn format_hhmmss(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// `8:05 AM` style, used by the human-readable listings.
pub fn format_12h(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_precisions() {
        assert_eq!(parse_time("08:10"), NaiveTime::from_hms_opt(8, 10, 0));
        assert_eq!(parse_time("08:10:59"), NaiveTime::from_hms_opt(8, 10, 59));
        assert_eq!(parse_time("8h10"), None);
    }

    #[test]
    fn minute_of_day_truncates_seconds() {
        let t = NaiveTime::from_hms_opt(8, 9, 59).unwrap();
        assert_eq!(minute_of_day(t), 8 * 60 + 9);
    }

    #[test]
    fn malformed_clock_names_the_field() {
        let err = parse_clock("start_time", "25:00").unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "start_time"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

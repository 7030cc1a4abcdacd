use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Like [`parse_date`] but reports which field was malformed.
pub fn parse_date_field(field: &'static str, s: &str) -> AppResult<NaiveDate> {
    parse_date(s)
        .ok_or_else(|| AppError::validation(field, format!("'{}' is not a YYYY-MM-DD date", s)))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(d: NaiveDate) -> u8 {
    d.weekday().num_days_from_sunday() as u8
}

pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("?")
}

/// Accepts `0`..`6` (0 = Sunday), full names or three-letter abbreviations.
pub fn parse_day(field: &'static str, s: &str) -> AppResult<u8> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(AppError::validation(field, format!("{} is outside 0 (Sunday) .. 6 (Saturday)", n)))
        };
    }

    let lower = s.to_lowercase();
    DAY_NAMES
        .iter()
        .position(|name| {
            let name = name.to_lowercase();
            name == lower || (lower.len() == 3 && name.starts_with(&lower))
        })
        .map(|i| i as u8)
        .ok_or_else(|| AppError::validation(field, format!("'{}' is not a day of the week", s)))
}

/// The Sunday on or before `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_sunday() as i64)
}

pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation("month", format!("{year}-{month:02} is not a month")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next
        .and_then(|n| n.pred_opt())
        .ok_or_else(|| AppError::validation("month", format!("{year}-{month:02} is out of range")))?;
    Ok((first, last))
}

/// Every date of the inclusive range `from..=to` (empty when `from > to`).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = from;
    while d <= to {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

// src/utils/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_bounds;
use chrono::{Datelike, NaiveDate};

/// Parse a `--range` expression into inclusive date bounds.
///
/// Supported forms:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// `all` yields `None` (no bounds).
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid("start and end must have the same format"));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r)?,
    };

    if start > end {
        return Err(invalid(&format!("{start} is after {end}")));
    }
    Ok(Some((start, end)))
}

/// First and last day of a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid("invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year"))?;
            Ok((d1, d2))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid("invalid month"))?;
            month_bounds(first.year(), first.month())
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid("invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(&format!("unsupported range format '{p}'"))),
    }
}

fn invalid(message: &str) -> AppError {
    AppError::validation("range", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn month_range_spans_whole_month() {
        let bounds = parse_range("2024-02").unwrap();
        assert_eq!(bounds, Some((d("2024-02-01"), d("2024-02-29"))));
    }

    #[test]
    fn interval_uses_outer_edges() {
        let bounds = parse_range("2024-01:2024-03").unwrap();
        assert_eq!(bounds, Some((d("2024-01-01"), d("2024-03-31"))));
    }

    #[test]
    fn all_means_unbounded() {
        assert_eq!(parse_range("ALL").unwrap(), None);
    }

    #[test]
    fn rejects_mixed_and_reversed_ranges() {
        assert!(parse_range("2024:2024-03").is_err());
        assert!(parse_range("2024-03-10:2024-03-01").is_err());
        assert!(parse_range("03/2024").is_err());
    }

    #[test]
    fn non_ascii_input_is_a_validation_error() {
        for bad in ["abcé-1", "2024é1", "2024-é", "é:2024"] {
            assert!(
                matches!(parse_range(bad), Err(AppError::Validation { field: "range", .. })),
                "{bad}"
            );
        }
        assert!(parse_range("2024/03").is_err());
    }
}

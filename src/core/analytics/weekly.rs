//! Weekly trend buckets keyed by the Sunday that starts each week.

use super::aggregator::StatusCounts;
use crate::models::AttendanceLog;
use crate::utils::date::week_start;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Group arrival outcomes by week, oldest first, keeping only the most recent
/// `limit` weeks. Older weeks are dropped, not merged.
pub fn weekly_buckets<'a, I>(logs: I, limit: usize) -> Vec<WeekBucket>
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut weeks: BTreeMap<NaiveDate, StatusCounts> = BTreeMap::new();

    for log in logs {
        if let Some(outcome) = log.arrival_outcome() {
            weeks.entry(week_start(log.date)).or_default().record(outcome);
        }
    }

    let skip = weeks.len().saturating_sub(limit);
    weeks
        .into_iter()
        .skip(skip)
        .map(|(week_start, counts)| WeekBucket { week_start, counts })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, LogSource, ScanType};
    use chrono::{Duration, NaiveTime};

    fn arrival(date: NaiveDate, status: AttendanceStatus) -> AttendanceLog {
        AttendanceLog::new(
            "t1",
            "c1",
            Some("s1"),
            date,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ScanType::In,
            Some(status),
            LogSource::Rfid,
        )
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn monday_and_friday_share_a_sunday_bucket() {
        let logs = vec![
            arrival(d("2024-03-04"), AttendanceStatus::OnTime),
            arrival(d("2024-03-08"), AttendanceStatus::Late),
        ];
        let buckets = weekly_buckets(&logs, 8);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].week_start, d("2024-03-03"));
        assert_eq!(buckets[0].counts.on_time, 1);
        assert_eq!(buckets[0].counts.late, 1);
    }

    #[test]
    fn keeps_only_the_most_recent_weeks_in_order() {
        let first = d("2024-01-07"); // a Sunday
        let logs: Vec<_> = (0..10)
            .rev()
            .map(|w| arrival(first + Duration::weeks(w), AttendanceStatus::Absent))
            .collect();

        let buckets = weekly_buckets(&logs, 4);
        let starts: Vec<_> = buckets.iter().map(|b| b.week_start).collect();
        assert_eq!(
            starts,
            vec![
                first + Duration::weeks(6),
                first + Duration::weeks(7),
                first + Duration::weeks(8),
                first + Duration::weeks(9),
            ]
        );
        assert!(buckets.iter().all(|b| b.counts.absent == 1));
    }

    #[test]
    fn out_scans_do_not_open_buckets() {
        let mut out = arrival(d("2024-03-04"), AttendanceStatus::EarlyLeave);
        out.scan_type = ScanType::Out;
        assert!(weekly_buckets(&[out], 8).is_empty());
    }
}

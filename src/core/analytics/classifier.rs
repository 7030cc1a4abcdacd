//! Scan → attendance status.
//!
//! Comparisons are done on minutes since midnight, seconds truncated, in the
//! venue's wall-clock frame.

use crate::errors::AppResult;
use crate::models::{AttendanceStatus, ScanType, Schedule};
use crate::utils::date::day_of_week;
use crate::utils::time::{minute_of_day, parse_clock};
use chrono::{NaiveDate, NaiveTime};

/// Outcome of classifying a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The scan carries a punctuality status.
    Status(AttendanceStatus),
    /// An `out` scan at or after the slot end: a normal checkout.
    Checkout,
    /// No schedule slot matched. Kept in raw logs, ignored by statistics.
    Unscheduled,
}

impl Classification {
    pub fn status(self) -> Option<AttendanceStatus> {
        match self {
            Classification::Status(s) => Some(s),
            Classification::Checkout | Classification::Unscheduled => None,
        }
    }
}

pub fn classify(
    scan_type: ScanType,
    scan_time: NaiveTime,
    schedule: Option<&Schedule>,
) -> Classification {
    let Some(slot) = schedule else {
        return Classification::Unscheduled;
    };

    let minute = minute_of_day(scan_time);

    match scan_type {
        // The grace period absorbs lateness up to and including its last minute.
        ScanType::In if minute <= slot.on_time_deadline() => {
            Classification::Status(AttendanceStatus::OnTime)
        }
        ScanType::In => Classification::Status(AttendanceStatus::Late),
        ScanType::Out if minute < slot.end_minute() => {
            Classification::Status(AttendanceStatus::EarlyLeave)
        }
        ScanType::Out => Classification::Checkout,
    }
}

/// String entry point: parses `scan_type` and `scan_time` first and reports
/// the offending field when either is malformed.
pub fn classify_raw(
    scan_type: &str,
    scan_time: &str,
    schedule: Option<&Schedule>,
) -> AppResult<Classification> {
    let kind = ScanType::parse(scan_type)?;
    let time = parse_clock("scan_time", scan_time)?;
    Ok(classify(kind, time, schedule))
}

/// Resolve the slot a scan belongs to: same teacher, classroom and weekday.
///
/// When several slots qualify, the one whose window contains the scan wins,
/// otherwise the one whose window edge is nearest.
pub fn match_schedule<'a>(
    schedules: &'a [Schedule],
    teacher_id: &str,
    classroom_id: &str,
    date: NaiveDate,
    scan_time: NaiveTime,
) -> Option<&'a Schedule> {
    let dow = day_of_week(date);
    let minute = minute_of_day(scan_time);

    schedules
        .iter()
        .filter(|s| {
            s.teacher_id == teacher_id && s.classroom_id == classroom_id && s.day_of_week == dow
        })
        .min_by_key(|s| (window_distance(s, minute), s.start_minute()))
}

fn window_distance(slot: &Schedule, minute: u32) -> u32 {
    if minute < slot.start_minute() {
        slot.start_minute() - minute
    } else if minute > slot.end_minute() {
        minute - slot.end_minute()
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn t(s: &str) -> NaiveTime {
        crate::utils::time::parse_time(s).unwrap()
    }

    fn slot(start: &str, end: &str, grace: u32) -> Schedule {
        let mut s = Schedule::new("t1", "c1", 1, t(start), t(end), grace).unwrap();
        s.id = format!("s-{start}");
        s
    }

    #[test]
    fn grace_boundary_is_inclusive() {
        let s = slot("08:00", "09:00", 10);
        assert_eq!(
            classify(ScanType::In, t("08:10:00"), Some(&s)),
            Classification::Status(AttendanceStatus::OnTime)
        );
        assert_eq!(
            classify(ScanType::In, t("08:10:59"), Some(&s)),
            Classification::Status(AttendanceStatus::OnTime)
        );
        assert_eq!(
            classify(ScanType::In, t("08:11:00"), Some(&s)),
            Classification::Status(AttendanceStatus::Late)
        );
    }

    #[test]
    fn early_arrival_is_on_time() {
        let s = slot("08:00", "09:00", 0);
        assert_eq!(
            classify(ScanType::In, t("07:30"), Some(&s)).status(),
            Some(AttendanceStatus::OnTime)
        );
        assert_eq!(
            classify(ScanType::In, t("08:01"), Some(&s)).status(),
            Some(AttendanceStatus::Late)
        );
    }

    #[test]
    fn reference_scenario() {
        let s = slot("08:00", "09:00", 10);
        assert_eq!(
            classify_raw("in", "08:09:00", Some(&s)).unwrap(),
            Classification::Status(AttendanceStatus::OnTime)
        );
        assert_eq!(
            classify_raw("in", "08:11:00", Some(&s)).unwrap(),
            Classification::Status(AttendanceStatus::Late)
        );
        assert_eq!(
            classify_raw("out", "08:55:00", Some(&s)).unwrap(),
            Classification::Status(AttendanceStatus::EarlyLeave)
        );
    }

    #[test]
    fn checkout_at_or_after_end_has_no_status() {
        let s = slot("08:00", "09:00", 10);
        assert_eq!(classify(ScanType::Out, t("09:00:00"), Some(&s)), Classification::Checkout);
        assert_eq!(classify(ScanType::Out, t("09:30"), Some(&s)), Classification::Checkout);
        assert_eq!(
            classify(ScanType::Out, t("08:59:59"), Some(&s)).status(),
            Some(AttendanceStatus::EarlyLeave)
        );
    }

    #[test]
    fn no_slot_is_unscheduled_not_an_error() {
        assert_eq!(classify(ScanType::In, t("08:00"), None), Classification::Unscheduled);
        assert_eq!(classify_raw("out", "10:00", None).unwrap().status(), None);
    }

    #[test]
    fn malformed_inputs_name_the_field() {
        let s = slot("08:00", "09:00", 10);
        assert!(matches!(
            classify_raw("sideways", "08:00", Some(&s)),
            Err(AppError::Validation { field: "scan_type", .. })
        ));
        assert!(matches!(
            classify_raw("in", "8 o'clock", Some(&s)),
            Err(AppError::Validation { field: "scan_time", .. })
        ));
    }

    #[test]
    fn matching_prefers_the_containing_window() {
        // 2024-03-04 is a Monday (day 1)
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let slots = vec![slot("08:00", "09:00", 10), slot("10:00", "11:00", 10)];

        let hit = match_schedule(&slots, "t1", "c1", monday, t("10:20")).unwrap();
        assert_eq!(hit.id, "s-10:00");

        let near = match_schedule(&slots, "t1", "c1", monday, t("09:40")).unwrap();
        assert_eq!(near.id, "s-10:00");

        let before = match_schedule(&slots, "t1", "c1", monday, t("07:50")).unwrap();
        assert_eq!(before.id, "s-08:00");
    }

    #[test]
    fn matching_requires_teacher_room_and_weekday() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let slots = vec![slot("08:00", "09:00", 10)];

        assert!(match_schedule(&slots, "t1", "c1", tuesday, t("08:00")).is_none());
        assert!(match_schedule(&slots, "t2", "c1", monday, t("08:00")).is_none());
        assert!(match_schedule(&slots, "t1", "c2", monday, t("08:00")).is_none());
    }
}

//! Absence sweep: elapsed slots with no `in` scan become synthetic absences.

use crate::models::{AttendanceLog, Schedule};
use crate::utils::date::days_between;
use crate::utils::time::minute_of_day;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

type SlotKey<'a> = (&'a str, &'a str, NaiveDate);

/// Produce one absent record per `(teacher, slot, date)` in `from..=to` that
/// has fully elapsed at `now` and has no `in` log yet.
///
/// Occurrences that ended before the slot was created are skipped. Running the sweep again with
/// its own output merged into `logs` yields nothing.
pub fn sweep_absences(
    schedules: &[Schedule],
    logs: &[AttendanceLog],
    from: NaiveDate,
    to: NaiveDate,
    now: NaiveDateTime,
) -> Vec<AttendanceLog> {
    let mut seen: HashSet<SlotKey<'_>> = logs
        .iter()
        .filter(|l| l.scan_type.is_in())
        .filter_map(|l| {
            l.schedule_id
                .as_deref()
                .map(|sid| (l.teacher_id.as_str(), sid, l.date))
        })
        .collect();

    let mut absences = Vec::new();

    for date in days_between(from, to) {
        for slot in schedules.iter().filter(|s| s.occurs_on(date)) {
            if !has_elapsed(slot, date, now) {
                continue;
            }
            if !slot.existed_before_end_on(date) {
                continue;
            }
            if seen.insert((slot.teacher_id.as_str(), slot.id.as_str(), date)) {
                absences.push(AttendanceLog::absence(slot, date));
            }
        }
    }

    absences
}

fn has_elapsed(slot: &Schedule, date: NaiveDate, now: NaiveDateTime) -> bool {
    let today = now.date();
    date < today || (date == today && minute_of_day(now.time()) >= slot.end_minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, LogSource, ScanType};
    use chrono::{Local, NaiveTime, TimeZone};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        d(date).and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    // Mondays 08:00-09:00
    fn monday_slot() -> Schedule {
        let mut s = Schedule::new(
            "t1",
            "c1",
            1,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            10,
        )
        .unwrap();
        s.id = "s1".into();
        s.created_at = "2023-12-31T12:00:00+00:00".into();
        s
    }

    #[test]
    fn elapsed_slot_without_scan_is_absent() {
        let slots = vec![monday_slot()];
        let out = sweep_absences(&slots, &[], d("2024-03-03"), d("2024-03-09"), at("2024-03-10", "12:00"));

        assert_eq!(out.len(), 1);
        let a = &out[0];
        assert_eq!(a.date, d("2024-03-04"));
        assert_eq!(a.scan_type, ScanType::In);
        assert_eq!(a.status, Some(AttendanceStatus::Absent));
        assert_eq!(a.source, LogSource::Sweep);
        assert_eq!(a.time_str(), "09:00:00");
        assert_eq!(a.schedule_id.as_deref(), Some("s1"));
    }

    #[test]
    fn in_scan_suppresses_the_absence() {
        let slots = vec![monday_slot()];
        let scan = AttendanceLog::new(
            "t1",
            "c1",
            Some("s1"),
            d("2024-03-04"),
            NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
            ScanType::In,
            Some(AttendanceStatus::Late),
            LogSource::Rfid,
        );
        let out = sweep_absences(&slots, &[scan], d("2024-03-04"), d("2024-03-04"), at("2024-03-05", "00:00"));
        assert!(out.is_empty());
    }

    #[test]
    fn slot_still_running_today_is_not_swept() {
        let slots = vec![monday_slot()];
        let during = sweep_absences(&slots, &[], d("2024-03-04"), d("2024-03-04"), at("2024-03-04", "08:59"));
        assert!(during.is_empty());

        let after = sweep_absences(&slots, &[], d("2024-03-04"), d("2024-03-04"), at("2024-03-04", "09:00"));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn future_dates_and_pre_creation_dates_are_skipped() {
        let slots = vec![monday_slot()];
        let out = sweep_absences(&slots, &[], d("2023-12-01"), d("2024-12-31"), at("2024-01-20", "10:00"));
        let dates: Vec<_> = out.iter().map(|a| a.date_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-08", "2024-01-15"]);
    }

    #[test]
    fn slot_created_after_todays_class_ended_is_not_swept_today() {
        let mut slot = monday_slot();
        slot.created_at = Local
            .from_local_datetime(&at("2024-03-04", "10:00"))
            .single()
            .unwrap()
            .to_rfc3339();
        let slots = vec![slot];

        let out = sweep_absences(&slots, &[], d("2024-03-04"), d("2024-03-11"), at("2024-03-11", "12:00"));
        let dates: Vec<_> = out.iter().map(|a| a.date_str()).collect();
        assert_eq!(dates, vec!["2024-03-11"]);
    }

    #[test]
    fn sweeping_twice_yields_nothing_new() {
        let slots = vec![monday_slot()];
        let now = at("2024-03-31", "23:00");
        let first = sweep_absences(&slots, &[], d("2024-03-01"), d("2024-03-31"), now);
        assert_eq!(first.len(), 4);

        let second = sweep_absences(&slots, &first, d("2024-03-01"), d("2024-03-31"), now);
        assert!(second.is_empty());
    }
}

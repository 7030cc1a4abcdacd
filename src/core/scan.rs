//! Recording a badge scan: resolve, match, classify, persist.

use crate::core::analytics::{Classification, classify, match_schedule};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_teacher_by_rfid, logs_for_teacher_on, schedules_for_teacher};
use crate::db::store;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceLog, Classroom, LogSource, ScanType, Schedule, Teacher};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};

pub struct ScanRequest {
    pub rfid: String,
    pub classroom_id: String,
    pub scan_type: Option<ScanType>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

pub struct ScanOutcome {
    pub log: AttendanceLog,
    pub teacher: Teacher,
    pub classroom: Classroom,
    pub schedule: Option<Schedule>,
    pub classification: Classification,
}

/// Pick `out` when the teacher's last manual/RFID scan for this slot and
/// date is an `in`, otherwise `in`.
pub fn infer_scan_type(day_logs: &[AttendanceLog], schedule_id: Option<&str>) -> ScanType {
    let last = day_logs
        .iter()
        .filter(|l| l.source != LogSource::Sweep && l.schedule_id.as_deref() == schedule_id)
        .max_by_key(|l| l.scan_time);

    match last {
        Some(l) if l.scan_type.is_in() => ScanType::Out,
        _ => ScanType::In,
    }
}

pub struct ScanLogic;

impl ScanLogic {
    pub fn record(pool: &mut DbPool, req: ScanRequest) -> AppResult<ScanOutcome> {
        let teacher = find_teacher_by_rfid(&pool.conn, &req.rfid)?
            .ok_or_else(|| AppError::UnknownBadge(req.rfid.trim().to_string()))?;
        let classroom: Classroom = store::get(&pool.conn, &req.classroom_id)?;

        let manual = req.date.is_some() || req.time.is_some();
        let now = Local::now().naive_local();
        let date = req.date.unwrap_or(now.date());
        let scan_time = match req.time {
            Some(t) => t,
            // sub-second precision is never stored
            None => now.time().with_nanosecond(0).unwrap_or(now.time()),
        };

        let schedules = schedules_for_teacher(&pool.conn, &teacher.id)?;
        let schedule = match_schedule(&schedules, &teacher.id, &classroom.id, date, scan_time).cloned();
        let schedule_id = schedule.as_ref().map(|s| s.id.as_str());

        let scan_type = match req.scan_type {
            Some(kind) => kind,
            None => {
                let day_logs = logs_for_teacher_on(&pool.conn, &teacher.id, date)?;
                infer_scan_type(&day_logs, schedule_id)
            }
        };

        let classification = classify(scan_type, scan_time, schedule.as_ref());

        let log = AttendanceLog::new(
            &teacher.id,
            &classroom.id,
            schedule_id,
            date,
            scan_time,
            scan_type,
            classification.status(),
            if manual { LogSource::Manual } else { LogSource::Rfid },
        );

        let log = pool.with_tx(|conn| {
            let saved = store::create(conn, log)?;
            ttlog(
                conn,
                "scan",
                &teacher.id,
                &format!(
                    "{} {} {} at {} ({})",
                    teacher.name,
                    saved.scan_type.to_db_str(),
                    classroom.name,
                    saved.time_str(),
                    saved.status.map(|s| s.to_db_str()).unwrap_or("no status"),
                ),
            )?;
            Ok(saved)
        })?;

        Ok(ScanOutcome {
            log,
            teacher,
            classroom,
            schedule,
            classification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;

    fn log(time: &str, kind: ScanType, source: LogSource, schedule: Option<&str>) -> AttendanceLog {
        AttendanceLog::new(
            "t1",
            "c1",
            schedule,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            kind,
            Some(AttendanceStatus::OnTime),
            source,
        )
    }

    #[test]
    fn first_scan_of_a_slot_is_in() {
        assert_eq!(infer_scan_type(&[], Some("s1")), ScanType::In);
    }

    #[test]
    fn open_in_is_closed_by_out() {
        let logs = vec![log("08:00", ScanType::In, LogSource::Rfid, Some("s1"))];
        assert_eq!(infer_scan_type(&logs, Some("s1")), ScanType::Out);
        // another slot is unaffected
        assert_eq!(infer_scan_type(&logs, Some("s2")), ScanType::In);
    }

    #[test]
    fn completed_pair_starts_over() {
        let logs = vec![
            log("08:00", ScanType::In, LogSource::Rfid, Some("s1")),
            log("09:00", ScanType::Out, LogSource::Rfid, Some("s1")),
        ];
        assert_eq!(infer_scan_type(&logs, Some("s1")), ScanType::In);
    }

    #[test]
    fn swept_absence_does_not_open_a_pair() {
        let logs = vec![log("09:00", ScanType::In, LogSource::Sweep, Some("s1"))];
        assert_eq!(infer_scan_type(&logs, Some("s1")), ScanType::In);
    }
}

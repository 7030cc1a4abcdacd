//! Row mapping for every collection plus the few lookups that are not plain
//! equality filters.

use crate::db::store::{self, Collection, Document, FieldFilter, invalid_field};
use crate::errors::{AppError, AppResult};
use crate::models::{
    AttendanceLog, AttendanceStatus, Classroom, LogSource, Notification, NotificationCategory,
    NotificationType, ScanType, Schedule, Teacher,
};
use crate::utils::date::{format_date, parse_date_field};
use crate::utils::time::{format_hhmm, format_hhmmss, parse_clock};
use rusqlite::{Connection, Row, params};

/// Read a TEXT column and parse it, reporting the column as the failing field.
fn parsed<T>(
    row: &Row<'_>,
    field: &'static str,
    parse: impl FnOnce(&'static str, &str) -> AppResult<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(field)?;
    parse(field, &raw).map_err(|e| invalid_field(row.as_ref().column_index(field).unwrap_or(0), e))
}

fn enum_field<T>(field: &'static str, raw: &str, from: fn(&str) -> Option<T>) -> AppResult<T> {
    from(raw).ok_or_else(|| AppError::validation(field, format!("unexpected value '{}'", raw)))
}

// ---------------------------
// Teachers
// ---------------------------

impl Document for Teacher {
    const COLLECTION: Collection = Collection::Teachers;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, created_at: String) {
        self.id = id;
        self.created_at = created_at;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Teacher {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            rfid_id: row.get("rfid_id")?,
            created_at: row.get("created_at")?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO teachers (id, name, email, rfid_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![self.id, self.name, self.email, self.rfid_id, self.created_at],
        )
    }
}

pub fn find_teacher_by_rfid(conn: &Connection, rfid: &str) -> AppResult<Option<Teacher>> {
    Ok(store::list::<Teacher>(conn, Some(&FieldFilter::eq("rfid_id", rfid.trim())))?
        .into_iter()
        .next())
}

/// Insert a teacher, refusing a badge that is already assigned.
pub fn create_teacher(conn: &Connection, teacher: Teacher) -> AppResult<Teacher> {
    if find_teacher_by_rfid(conn, &teacher.rfid_id)?.is_some() {
        return Err(AppError::DuplicateBadge(teacher.rfid_id));
    }
    store::create(conn, teacher)
}

// ---------------------------
// Classrooms
// ---------------------------

impl Document for Classroom {
    const COLLECTION: Collection = Collection::Classrooms;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, created_at: String) {
        self.id = id;
        self.created_at = created_at;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Classroom {
            id: row.get("id")?,
            name: row.get("name")?,
            location: row.get("location")?,
            created_at: row.get("created_at")?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO classrooms (id, name, location, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.id, self.name, self.location, self.created_at],
        )
    }
}

// ---------------------------
// Schedules
// ---------------------------

impl Document for Schedule {
    const COLLECTION: Collection = Collection::Schedules;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, created_at: String) {
        self.id = id;
        self.created_at = created_at;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Schedule {
            id: row.get("id")?,
            teacher_id: row.get("teacher_id")?,
            classroom_id: row.get("classroom_id")?,
            day_of_week: row.get("day_of_week")?,
            start_time: parsed(row, "start_time", parse_clock)?,
            end_time: parsed(row, "end_time", parse_clock)?,
            grace_period_minutes: row.get("grace_period_minutes")?,
            created_at: row.get("created_at")?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO schedules (id, teacher_id, classroom_id, day_of_week, start_time, end_time, grace_period_minutes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                self.id,
                self.teacher_id,
                self.classroom_id,
                self.day_of_week,
                format_hhmm(self.start_time),
                format_hhmm(self.end_time),
                self.grace_period_minutes,
                self.created_at,
            ],
        )
    }
}

pub fn schedules_for_teacher(conn: &Connection, teacher_id: &str) -> AppResult<Vec<Schedule>> {
    store::list(conn, Some(&FieldFilter::eq("teacher_id", teacher_id)))
}

// ---------------------------
// Attendance logs
// ---------------------------

impl Document for AttendanceLog {
    const COLLECTION: Collection = Collection::AttendanceLogs;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, created_at: String) {
        self.id = id;
        self.created_at = created_at;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let status: Option<String> = row.get("status")?;
        let status = match status {
            Some(s) => Some(
                enum_field("status", &s, AttendanceStatus::from_db_str)
                    .map_err(|e| invalid_field(0, e))?,
            ),
            None => None,
        };

        Ok(AttendanceLog {
            id: row.get("id")?,
            teacher_id: row.get("teacher_id")?,
            classroom_id: row.get("classroom_id")?,
            schedule_id: row.get("schedule_id")?,
            date: parsed(row, "date", parse_date_field)?,
            scan_time: parsed(row, "scan_time", parse_clock)?,
            scan_type: parsed(row, "scan_type", |f, s| enum_field(f, s, ScanType::from_db_str))?,
            status,
            source: parsed(row, "source", |f, s| enum_field(f, s, LogSource::from_db_str))?,
            created_at: row.get("created_at")?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO attendance_logs (id, teacher_id, classroom_id, schedule_id, date, scan_time, scan_type, status, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                self.id,
                self.teacher_id,
                self.classroom_id,
                self.schedule_id,
                format_date(self.date),
                format_hhmmss(self.scan_time),
                self.scan_type.to_db_str(),
                self.status.map(|s| s.to_db_str()),
                self.source.to_db_str(),
                self.created_at,
            ],
        )
    }
}

/// Logs of one teacher on one date, in scan order.
pub fn logs_for_teacher_on(
    conn: &Connection,
    teacher_id: &str,
    date: chrono::NaiveDate,
) -> AppResult<Vec<AttendanceLog>> {
    let mut logs: Vec<AttendanceLog> =
        store::list(conn, Some(&FieldFilter::eq("teacher_id", teacher_id)))?;
    logs.retain(|l| l.date == date);
    logs.sort_by_key(|l| l.scan_time);
    Ok(logs)
}

// ---------------------------
// Notifications
// ---------------------------

impl Document for Notification {
    const COLLECTION: Collection = Collection::Notifications;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign(&mut self, id: String, created_at: String) {
        self.id = id;
        self.created_at = created_at;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Notification {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            user_role: row.get("user_role")?,
            title: row.get("title")?,
            message: row.get("message")?,
            kind: parsed(row, "type", |f, s| enum_field(f, s, NotificationType::from_db_str))?,
            category: parsed(row, "category", |f, s| {
                enum_field(f, s, NotificationCategory::from_db_str)
            })?,
            read: row.get::<_, i64>("read")? != 0,
            created_at: row.get("created_at")?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO notifications (id, user_id, user_role, title, message, type, category, read, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                self.id,
                self.user_id,
                self.user_role,
                self.title,
                self.message,
                self.kind.to_db_str(),
                self.category.to_db_str(),
                self.read as i64,
                self.created_at,
            ],
        )
    }
}

pub fn mark_notifications_read(conn: &Connection, user_id: &str) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE notifications SET read = 1 WHERE user_id = ?1 AND read = 0",
        params![user_id],
    )?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use chrono::{NaiveDate, NaiveTime};

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c, true).unwrap();
        c
    }

    #[test]
    fn duplicate_badge_is_refused() {
        let c = conn();
        create_teacher(&c, Teacher::new(None, "Ada Byron", "ada@school.edu", "RF-1").unwrap()).unwrap();
        let err = create_teacher(&c, Teacher::new(None, "Alan Turing", "alan@school.edu", "RF-1").unwrap())
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateBadge(ref b) if b == "RF-1"));
        assert!(find_teacher_by_rfid(&c, "RF-1").unwrap().is_some());
        assert!(find_teacher_by_rfid(&c, "RF-2").unwrap().is_none());
    }

    #[test]
    fn unscheduled_log_keeps_null_status() {
        let c = conn();
        let log = AttendanceLog::new(
            "t1",
            "c1",
            None,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveTime::from_hms_opt(7, 45, 12).unwrap(),
            ScanType::In,
            None,
            LogSource::Manual,
        );
        let saved = store::create(&c, log).unwrap();

        let back: AttendanceLog = store::get(&c, &saved.id).unwrap();
        assert_eq!(back.status, None);
        assert_eq!(back.schedule_id, None);
        assert_eq!(back.time_str(), "07:45:12");
        assert_eq!(back.source, LogSource::Manual);
    }

    #[test]
    fn notifications_round_trip_flags() {
        let c = conn();
        let n = Notification::for_teacher(
            "t1",
            "Late arrival",
            "Please check in on time",
            NotificationType::Warning,
            NotificationCategory::Attendance,
        )
        .unwrap();
        store::create(&c, n).unwrap();

        assert_eq!(mark_notifications_read(&c, "t1").unwrap(), 1);
        let back: Vec<Notification> = store::list(&c, Some(&FieldFilter::eq("user_id", "t1"))).unwrap();
        assert!(back[0].read);
        assert_eq!(back[0].kind, NotificationType::Warning);
    }
}

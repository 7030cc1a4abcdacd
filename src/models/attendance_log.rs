use super::{scan_type::ScanType, schedule::Schedule, status::AttendanceStatus};
use crate::utils::date::format_date;
use crate::utils::time::format_hhmmss;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Where a log row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    Rfid,   // live badge read
    Manual, // badge read with an explicit --date/--time
    Sweep,  // synthetic absence
}

impl LogSource {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LogSource::Rfid => "rfid",
            LogSource::Manual => "manual",
            LogSource::Sweep => "sweep",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "rfid" => Some(LogSource::Rfid),
            "manual" => Some(LogSource::Manual),
            "sweep" => Some(LogSource::Sweep),
            _ => None,
        }
    }
}

/// One row per physical scan (or per synthetic absence).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceLog {
    pub id: String,
    pub teacher_id: String,
    pub classroom_id: String,
    pub schedule_id: Option<String>, // None ⇔ unscheduled scan
    pub date: NaiveDate,             // ⇔ attendance_logs.date (TEXT "YYYY-MM-DD")
    pub scan_time: NaiveTime,        // ⇔ attendance_logs.scan_time (TEXT "HH:MM:SS")
    pub scan_type: ScanType,
    pub status: Option<AttendanceStatus>, // None ⇔ no punctuality status
    pub source: LogSource,
    pub created_at: String, // ingestion time, recency ordering only
}

impl AttendanceLog {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        teacher_id: &str,
        classroom_id: &str,
        schedule_id: Option<&str>,
        date: NaiveDate,
        scan_time: NaiveTime,
        scan_type: ScanType,
        status: Option<AttendanceStatus>,
        source: LogSource,
    ) -> Self {
        Self {
            id: String::new(),
            teacher_id: teacher_id.to_string(),
            classroom_id: classroom_id.to_string(),
            schedule_id: schedule_id.map(str::to_string),
            date,
            scan_time,
            scan_type,
            status,
            source,
            created_at: String::new(),
        }
    }

    /// Synthetic `absent` record for a slot that elapsed without an `in` scan.
    /// Stamped at the slot's end time, the moment the absence became certain.
    pub fn absence(schedule: &Schedule, date: NaiveDate) -> Self {
        Self::new(
            &schedule.teacher_id,
            &schedule.classroom_id,
            Some(&schedule.id),
            date,
            schedule.end_time,
            ScanType::In,
            Some(AttendanceStatus::Absent),
            LogSource::Sweep,
        )
    }

    pub fn date_str(&self) -> String {
        format_date(self.date)
    }

    pub fn time_str(&self) -> String {
        format_hhmmss(self.scan_time)
    }

    pub fn has_status(&self, status: AttendanceStatus) -> bool {
        self.status == Some(status)
    }

    /// An `in` log carrying an arrival outcome (on time, late or absent).
    /// Only these feed punctuality statistics.
    pub fn arrival_outcome(&self) -> Option<AttendanceStatus> {
        match (self.scan_type, self.status) {
            (ScanType::In, Some(s)) if s.is_arrival_outcome() => Some(s),
            _ => None,
        }
    }

    pub fn is_early_leave(&self) -> bool {
        self.scan_type.is_out() && self.has_status(AttendanceStatus::EarlyLeave)
    }
}

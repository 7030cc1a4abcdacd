// src/export/model.rs

use crate::core::analytics::TeacherBreakdown;
use crate::models::EnrichedLog;
use serde::Serialize;

/// A flat record that every export format can write.
pub trait Tabular: Serialize {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Attendance log joined with teacher and classroom names.
#[derive(Serialize, Clone, Debug)]
pub struct LogExport {
    pub id: String,
    pub date: String,
    pub scan_time: String,
    pub teacher_id: String,
    pub teacher: String,
    pub classroom_id: String,
    pub classroom: String,
    pub scan_type: String,
    pub status: String,
    pub source: String,
}

impl From<&EnrichedLog<'_>> for LogExport {
    fn from(e: &EnrichedLog<'_>) -> Self {
        Self {
            id: e.log.id.clone(),
            date: e.log.date_str(),
            scan_time: e.log.time_str(),
            teacher_id: e.log.teacher_id.clone(),
            teacher: e.teacher_name().to_string(),
            classroom_id: e.log.classroom_id.clone(),
            classroom: e.classroom_name().to_string(),
            scan_type: e.log.scan_type.to_db_str().to_string(),
            status: e.log.status.map(|s| s.to_db_str()).unwrap_or("").to_string(),
            source: e.log.source.to_db_str().to_string(),
        }
    }
}

impl Tabular for LogExport {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "date",
            "scan_time",
            "teacher_id",
            "teacher",
            "classroom_id",
            "classroom",
            "scan_type",
            "status",
            "source",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.clone(),
            self.scan_time.clone(),
            self.teacher_id.clone(),
            self.teacher.clone(),
            self.classroom_id.clone(),
            self.classroom.clone(),
            self.scan_type.clone(),
            self.status.clone(),
            self.source.clone(),
        ]
    }
}

/// One per-teacher breakdown row.
#[derive(Serialize, Clone, Debug)]
pub struct TeacherStatsExport {
    pub teacher_id: String,
    pub teacher: String,
    pub on_time: u32,
    pub late: u32,
    pub absent: u32,
    pub total: u32,
    pub punctuality_rate: u32,
}

impl TeacherStatsExport {
    pub fn new(row: &TeacherBreakdown, name: &str) -> Self {
        Self {
            teacher_id: row.teacher_id.clone(),
            teacher: name.to_string(),
            on_time: row.counts.on_time,
            late: row.counts.late,
            absent: row.counts.absent,
            total: row.total,
            punctuality_rate: row.punctuality_rate,
        }
    }
}

impl Tabular for TeacherStatsExport {
    fn headers() -> &'static [&'static str] {
        &[
            "teacher_id",
            "teacher",
            "on_time",
            "late",
            "absent",
            "total",
            "punctuality_rate",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.teacher_id.clone(),
            self.teacher.clone(),
            self.on_time.to_string(),
            self.late.to_string(),
            self.absent.to_string(),
            self.total.to_string(),
            self.punctuality_rate.to_string(),
        ]
    }
}

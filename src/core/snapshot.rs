//! Every collection the analytics need, loaded at one instant.

use crate::db::store;
use crate::errors::AppResult;
use crate::models::enriched::{self, EnrichedLog};
use crate::models::{AttendanceLog, Classroom, Schedule, Teacher};
use rusqlite::Connection;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub teachers: Vec<Teacher>,
    pub classrooms: Vec<Classroom>,
    pub schedules: Vec<Schedule>,
    pub logs: Vec<AttendanceLog>,
}

impl Snapshot {
    pub fn load(conn: &Connection) -> AppResult<Self> {
        Ok(Self {
            teachers: store::list(conn, None)?,
            classrooms: store::list(conn, None)?,
            schedules: store::list(conn, None)?,
            logs: store::list(conn, None)?,
        })
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.classrooms.iter().find(|c| c.id == id)
    }

    pub fn teacher_name(&self, id: &str) -> &str {
        enriched::teacher_name(&self.teachers, id)
    }

    pub fn classroom_name(&self, id: &str) -> &str {
        self.classroom(id).map(|c| c.name.as_str()).unwrap_or("Unknown")
    }

    pub fn enrich<'a, I>(&'a self, logs: I) -> Vec<EnrichedLog<'a>>
    where
        I: IntoIterator<Item = &'a AttendanceLog>,
    {
        enriched::enrich(logs, &self.teachers, &self.classrooms)
    }

    pub fn teacher_ids(&self) -> Vec<String> {
        self.teachers.iter().map(|t| t.id.clone()).collect()
    }
}

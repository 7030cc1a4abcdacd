//! Read-time join of attendance logs with their teacher and classroom.

use super::{AttendanceLog, Classroom, Teacher};
use std::collections::HashMap;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy)]
pub struct EnrichedLog<'a> {
    pub log: &'a AttendanceLog,
    pub teacher: Option<&'a Teacher>,
    pub classroom: Option<&'a Classroom>,
}

impl<'a> EnrichedLog<'a> {
    pub fn teacher_name(&self) -> &'a str {
        self.teacher.map(|t| t.name.as_str()).unwrap_or(UNKNOWN)
    }

    pub fn classroom_name(&self) -> &'a str {
        self.classroom.map(|c| c.name.as_str()).unwrap_or(UNKNOWN)
    }
}

/// Join each log with its teacher and classroom by id. Dangling references
/// (deleted teachers or rooms) yield `None`, rendered as "Unknown".
pub fn enrich<'a, I>(logs: I, teachers: &'a [Teacher], classrooms: &'a [Classroom]) -> Vec<EnrichedLog<'a>>
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let by_teacher: HashMap<&str, &Teacher> =
        teachers.iter().map(|t| (t.id.as_str(), t)).collect();
    let by_room: HashMap<&str, &Classroom> =
        classrooms.iter().map(|c| (c.id.as_str(), c)).collect();

    logs.into_iter()
        .map(|log| EnrichedLog {
            log,
            teacher: by_teacher.get(log.teacher_id.as_str()).copied(),
            classroom: by_room.get(log.classroom_id.as_str()).copied(),
        })
        .collect()
}

/// Name lookup used by per-teacher tables.
pub fn teacher_name<'a>(teachers: &'a [Teacher], id: &str) -> &'a str {
    teachers
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.as_str())
        .unwrap_or(UNKNOWN)
}

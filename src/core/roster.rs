//! Admin management of teachers, classrooms and schedule slots.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::create_teacher;
use crate::db::store::{self, Collection, FieldFilter};
use crate::errors::AppResult;
use crate::models::{Classroom, Schedule, Teacher};
use crate::utils::time::format_hhmm;
use chrono::NaiveTime;

pub struct TeacherLogic;

impl TeacherLogic {
    pub fn add(
        pool: &mut DbPool,
        id: Option<String>,
        name: &str,
        email: &str,
        rfid: &str,
    ) -> AppResult<Teacher> {
        let teacher = Teacher::new(id, name, email, rfid)?;
        pool.with_tx(|conn| {
            let saved = create_teacher(conn, teacher)?;
            ttlog(
                conn,
                "add",
                &saved.id,
                &format!("Teacher {} <{}> badge {}", saved.name, saved.email, saved.rfid_id),
            )?;
            Ok(saved)
        })
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Teacher>> {
        store::list(&pool.conn, None)
    }

    /// Attendance history is kept; it renders as "Unknown" afterwards.
    pub fn del(pool: &mut DbPool, id: &str) -> AppResult<Teacher> {
        pool.with_tx(|conn| {
            let teacher: Teacher = store::get(conn, id)?;
            store::delete(conn, Collection::Teachers, id)?;
            ttlog(conn, "del", id, &format!("Teacher {} removed", teacher.name))?;
            Ok(teacher)
        })
    }
}

pub struct ClassroomLogic;

impl ClassroomLogic {
    pub fn add(pool: &mut DbPool, id: Option<String>, name: &str, location: &str) -> AppResult<Classroom> {
        let classroom = Classroom::new(id, name, location)?;
        pool.with_tx(|conn| {
            let saved = store::create(conn, classroom)?;
            ttlog(
                conn,
                "add",
                &saved.id,
                &format!("Classroom {} ({})", saved.name, saved.location),
            )?;
            Ok(saved)
        })
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Classroom>> {
        store::list(&pool.conn, None)
    }

    pub fn del(pool: &mut DbPool, id: &str) -> AppResult<Classroom> {
        pool.with_tx(|conn| {
            let classroom: Classroom = store::get(conn, id)?;
            store::delete(conn, Collection::Classrooms, id)?;
            ttlog(conn, "del", id, &format!("Classroom {} removed", classroom.name))?;
            Ok(classroom)
        })
    }
}

pub struct NewSlot {
    pub teacher_id: String,
    pub classroom_id: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub grace_period_minutes: u32,
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Both the teacher and the classroom must exist.
    pub fn add(pool: &mut DbPool, slot: NewSlot) -> AppResult<Schedule> {
        let schedule = Schedule::new(
            &slot.teacher_id,
            &slot.classroom_id,
            slot.day_of_week,
            slot.start_time,
            slot.end_time,
            slot.grace_period_minutes,
        )?;

        pool.with_tx(|conn| {
            let teacher: Teacher = store::get(conn, &schedule.teacher_id)?;
            let classroom: Classroom = store::get(conn, &schedule.classroom_id)?;
            let saved = store::create(conn, schedule)?;
            ttlog(
                conn,
                "add",
                &saved.id,
                &format!(
                    "Schedule {} {} {}-{} in {} (grace {}m)",
                    teacher.name,
                    saved.day_name(),
                    format_hhmm(saved.start_time),
                    format_hhmm(saved.end_time),
                    classroom.name,
                    saved.grace_period_minutes
                ),
            )?;
            Ok(saved)
        })
    }

    /// Slots ordered by weekday then start time.
    pub fn list(pool: &DbPool, teacher_id: Option<&str>) -> AppResult<Vec<Schedule>> {
        let filter = teacher_id.map(|id| FieldFilter::eq("teacher_id", id));
        let mut slots: Vec<Schedule> = store::list(&pool.conn, filter.as_ref())?;
        slots.sort_by_key(|s| (s.day_of_week, s.start_time));
        Ok(slots)
    }

    pub fn del(pool: &mut DbPool, id: &str) -> AppResult<Schedule> {
        pool.with_tx(|conn| {
            let slot: Schedule = store::get(conn, id)?;
            store::delete(conn, Collection::Schedules, id)?;
            ttlog(
                conn,
                "del",
                id,
                &format!("Schedule {} {} removed", slot.day_name(), format_hhmm(slot.start_time)),
            )?;
            Ok(slot)
        })
    }
}

use crate::errors::{AppError, AppResult};
use crate::utils::date::{day_name, day_of_week};
use crate::utils::time::minute_of_day;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub const MAX_GRACE_PERIOD: u32 = 60;

/// A recurring weekly slot assigning a teacher to a classroom.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Schedule {
    pub id: String,
    pub teacher_id: String,
    pub classroom_id: String,
    pub day_of_week: u8,       // 0 = Sunday .. 6 = Saturday
    pub start_time: NaiveTime, // ⇔ schedules.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,   // ⇔ schedules.end_time (TEXT "HH:MM")
    pub grace_period_minutes: u32,
    pub created_at: String,
}

impl Schedule {
    pub fn new(
        teacher_id: &str,
        classroom_id: &str,
        day_of_week: u8,
        start_time: NaiveTime,
        end_time: NaiveTime,
        grace_period_minutes: u32,
    ) -> AppResult<Self> {
        let schedule = Self {
            id: String::new(),
            teacher_id: teacher_id.trim().to_string(),
            classroom_id: classroom_id.trim().to_string(),
            day_of_week,
            start_time,
            end_time,
            grace_period_minutes,
            created_at: String::new(),
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.teacher_id.is_empty() {
            return Err(AppError::validation("teacher_id", "teacher is required"));
        }
        if self.classroom_id.is_empty() {
            return Err(AppError::validation("classroom_id", "classroom is required"));
        }
        if self.day_of_week > 6 {
            return Err(AppError::validation(
                "day_of_week",
                format!("{} is outside 0 (Sunday) .. 6 (Saturday)", self.day_of_week),
            ));
        }
        if self.grace_period_minutes > MAX_GRACE_PERIOD {
            return Err(AppError::validation(
                "grace_period_minutes",
                format!(
                    "{} exceeds the {} minute maximum",
                    self.grace_period_minutes, MAX_GRACE_PERIOD
                ),
            ));
        }
        if self.start_minute() >= self.end_minute() {
            return Err(AppError::validation(
                "end_time",
                format!(
                    "{} must be after start_time {}",
                    self.end_time.format("%H:%M"),
                    self.start_time.format("%H:%M")
                ),
            ));
        }
        Ok(())
    }

    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start_time)
    }

    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end_time)
    }

    /// Last minute at which an `in` scan still counts as on time.
    pub fn on_time_deadline(&self) -> u32 {
        self.start_minute() + self.grace_period_minutes
    }

    /// Does this slot recur on `date`?
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        day_of_week(date) == self.day_of_week
    }

    /// Local wall-clock time the slot was created, when `created_at` is
    /// parseable. Slot times are local too.
    pub fn created_local(&self) -> Option<NaiveDateTime> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .ok()
    }

    /// Did this slot exist before its occurrence on `date` ended?
    pub fn existed_before_end_on(&self, date: NaiveDate) -> bool {
        self.created_local()
            .is_none_or(|created| created < date.and_time(self.end_time))
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

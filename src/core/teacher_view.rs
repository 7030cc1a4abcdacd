//! The signed-in teacher's own page: month stats, recent history, today's
//! classes and the next one.

use crate::core::analytics::{LogFilter, Scope, Statistics, aggregate};
use crate::core::report::{print_distribution, print_logs, print_summary, print_weekly};
use crate::core::snapshot::Snapshot;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceLog, Schedule, Teacher};
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RESET};
use crate::utils::date::{day_of_week, month_bounds};
use crate::utils::formatting::bold;
use crate::utils::table::Table;
use crate::utils::time::{format_12h, minute_of_day};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub const RECENT_HISTORY: usize = 20;

/// Slots of `teacher_id` on `date`, by start time.
pub fn todays_classes<'a>(schedules: &'a [Schedule], teacher_id: &str, date: NaiveDate) -> Vec<&'a Schedule> {
    let dow = day_of_week(date);
    let mut out: Vec<&Schedule> = schedules
        .iter()
        .filter(|s| s.teacher_id == teacher_id && s.day_of_week == dow)
        .collect();
    out.sort_by_key(|s| s.start_time);
    out
}

/// First slot today that has not started yet.
pub fn next_class<'a>(schedules: &'a [Schedule], teacher_id: &str, now: NaiveDateTime) -> Option<&'a Schedule> {
    let minute = minute_of_day(now.time());
    todays_classes(schedules, teacher_id, now.date())
        .into_iter()
        .find(|s| s.start_minute() >= minute)
}

/// Newest first: date descending, then scan time descending.
pub fn recent_history<'a>(logs: &'a [AttendanceLog], teacher_id: &str, limit: usize) -> Vec<&'a AttendanceLog> {
    let mut own: Vec<&AttendanceLog> = logs.iter().filter(|l| l.teacher_id == teacher_id).collect();
    own.sort_by(|a, b| b.date.cmp(&a.date).then(b.scan_time.cmp(&a.scan_time)));
    own.truncate(limit);
    own
}

pub struct TeacherView<'a> {
    pub teacher: &'a Teacher,
    pub year: i32,
    pub month: u32,
    pub stats: Statistics,
    pub recent: Vec<&'a AttendanceLog>,
    pub today: Vec<&'a Schedule>,
    pub next: Option<&'a Schedule>,
}

impl<'a> TeacherView<'a> {
    /// `month` defaults to the month of `now`. Stats and the weekly trend
    /// both cover that month only.
    pub fn build(
        snapshot: &'a Snapshot,
        teacher_id: &str,
        year: Option<i32>,
        month: Option<u32>,
        weeks: usize,
        now: NaiveDateTime,
    ) -> AppResult<Self> {
        let teacher = snapshot.teacher(teacher_id).ok_or_else(|| AppError::NotFound {
            collection: "teachers",
            id: teacher_id.to_string(),
        })?;

        let year = year.unwrap_or(now.year());
        let month = month.unwrap_or(now.month());
        let (first, last) = month_bounds(year, month)?;

        let scope = Scope::teacher(teacher_id)
            .with_filter(LogFilter::new().teacher(teacher_id).between(first, last))
            .with_week_limit(weeks);
        let stats = aggregate(&snapshot.logs, &scope);

        Ok(Self {
            teacher,
            year,
            month,
            stats,
            recent: recent_history(&snapshot.logs, teacher_id, RECENT_HISTORY),
            today: todays_classes(&snapshot.schedules, teacher_id, now.date()),
            next: next_class(&snapshot.schedules, teacher_id, now),
        })
    }

    pub fn print(&self, snapshot: &Snapshot) {
        header(format!("{} ({:04}-{:02})", self.teacher.name, self.year, self.month));

        println!("{}", bold("Today"));
        if self.today.is_empty() {
            info("No classes today.");
        } else {
            let mut t = Table::new(["Start", "End", "Classroom", "Grace"]);
            for s in &self.today {
                let is_next = self.next.is_some_and(|n| n.id == s.id);
                let start = if is_next {
                    format!("{GREEN}{} ▶{RESET}", format_12h(s.start_time))
                } else {
                    format_12h(s.start_time)
                };
                t.add_row(vec![
                    start,
                    format_12h(s.end_time),
                    snapshot.classroom_name(&s.classroom_id).to_string(),
                    format!("{}m", s.grace_period_minutes),
                ]);
            }
            t.print();
        }
        println!();

        print_summary(&self.stats.summary);
        print_weekly(&self.stats.weekly);
        print_distribution(&self.stats.distribution);

        println!("{}", bold("Recent attendance"));
        print_logs(&snapshot.enrich(self.recent.iter().copied()));
        println!();
    }
}

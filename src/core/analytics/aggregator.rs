//! Classified logs → punctuality statistics.
//!
//! Every function here is pure and total: an empty input yields zero counts
//! and a zero rate, never an error.

use super::filter::LogFilter;
use super::weekly::{WeekBucket, weekly_buckets};
use crate::models::{AttendanceLog, AttendanceStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Buckets shown on the admin report.
pub const ADMIN_WEEKS: usize = 8;
/// Buckets shown on a single teacher's view.
pub const TEACHER_WEEKS: usize = 4;

/// Arrival outcomes of `in` scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub on_time: u32,
    pub late: u32,
    pub absent: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::OnTime => self.on_time += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::EarlyLeave => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.on_time + self.late + self.absent
    }

    pub fn punctuality_rate(&self) -> u32 {
        punctuality_rate(self.on_time, self.total())
    }
}

/// `round(on_time / total * 100)`, defined as 0 when `total` is 0.
///
/// Integer arithmetic, half rounds up.
pub fn punctuality_rate(on_time: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (on_time, total) = (on_time as u64, total as u64);
    ((on_time * 200 + total) / (total * 2)) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_scans: u32,
    pub on_time_count: u32,
    pub late_count: u32,
    pub absent_count: u32,
    pub early_leave_count: u32,
    pub punctuality_rate: u32,
}

impl Summary {
    pub fn total_in_scans(&self) -> u32 {
        self.on_time_count + self.late_count + self.absent_count
    }

    pub fn count_of(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::OnTime => self.on_time_count,
            AttendanceStatus::Late => self.late_count,
            AttendanceStatus::Absent => self.absent_count,
            AttendanceStatus::EarlyLeave => self.early_leave_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherBreakdown {
    pub teacher_id: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub total: u32,
    pub punctuality_rate: u32,
}

impl TeacherBreakdown {
    fn from_counts(teacher_id: String, counts: StatusCounts) -> Self {
        Self {
            teacher_id,
            total: counts.total(),
            punctuality_rate: counts.punctuality_rate(),
            counts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub status: AttendanceStatus,
    pub value: u32,
}

/// What a single aggregation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub filter: LogFilter,
    pub week_limit: usize,
    /// Teachers to list in the breakdown even with zero `in` scans.
    pub zero_fill: Vec<String>,
}

impl Scope {
    pub fn admin() -> Self {
        Self {
            filter: LogFilter::default(),
            week_limit: ADMIN_WEEKS,
            zero_fill: Vec::new(),
        }
    }

    pub fn teacher(teacher_id: &str) -> Self {
        Self {
            filter: LogFilter::new().teacher(teacher_id),
            week_limit: TEACHER_WEEKS,
            zero_fill: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_week_limit(mut self, weeks: usize) -> Self {
        self.week_limit = weeks;
        self
    }

    pub fn with_zero_fill<I, S>(mut self, teacher_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zero_fill = teacher_ids.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::admin()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub summary: Summary,
    pub weekly: Vec<WeekBucket>,
    pub teachers: Vec<TeacherBreakdown>,
    pub distribution: Vec<DistributionSlice>,
}

pub fn aggregate(logs: &[AttendanceLog], scope: &Scope) -> Statistics {
    let in_scope = scope.filter.apply(logs);
    let summary = summarize(in_scope.iter().copied());

    Statistics {
        weekly: weekly_buckets(in_scope.iter().copied(), scope.week_limit),
        teachers: teacher_breakdown(in_scope.iter().copied(), &scope.zero_fill),
        distribution: status_distribution(&summary),
        summary,
    }
}

pub fn summarize<'a, I>(logs: I) -> Summary
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut counts = StatusCounts::default();
    let mut total_scans = 0;
    let mut early_leave = 0;

    for log in logs {
        total_scans += 1;
        if let Some(outcome) = log.arrival_outcome() {
            counts.record(outcome);
        } else if log.is_early_leave() {
            early_leave += 1;
        }
    }

    Summary {
        total_scans,
        on_time_count: counts.on_time,
        late_count: counts.late,
        absent_count: counts.absent,
        early_leave_count: early_leave,
        punctuality_rate: counts.punctuality_rate(),
    }
}

/// Per-teacher arrival outcomes, ordered by teacher id.
pub fn teacher_breakdown<'a, I>(logs: I, zero_fill: &[String]) -> Vec<TeacherBreakdown>
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut groups: BTreeMap<String, StatusCounts> = BTreeMap::new();

    for id in zero_fill {
        groups.entry(id.clone()).or_default();
    }

    for log in logs {
        if let Some(outcome) = log.arrival_outcome() {
            groups.entry(log.teacher_id.clone()).or_default().record(outcome);
        }
    }

    groups
        .into_iter()
        .map(|(id, counts)| TeacherBreakdown::from_counts(id, counts))
        .collect()
}

/// Non-zero status counts as `(label, value)` slices.
pub fn status_distribution(summary: &Summary) -> Vec<DistributionSlice> {
    AttendanceStatus::ALL
        .iter()
        .map(|&status| DistributionSlice {
            label: status.label(),
            status,
            value: summary.count_of(status),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Punctuality outcome attached to a classified scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[value(name = "on_time")]
    OnTime,
    Late,
    #[value(name = "early_leave")]
    EarlyLeave,
    Absent,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::OnTime,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
        AttendanceStatus::EarlyLeave,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "on_time",
            AttendanceStatus::Late => "late",
            AttendanceStatus::EarlyLeave => "early_leave",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "on_time" => Some(AttendanceStatus::OnTime),
            "late" => Some(AttendanceStatus::Late),
            "early_leave" => Some(AttendanceStatus::EarlyLeave),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.trim().to_lowercase()).ok_or_else(|| {
            AppError::validation(
                "status",
                format!("'{}' is not one of on_time, late, early_leave, absent", s),
            )
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "On Time",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::EarlyLeave => "Early Leave",
            AttendanceStatus::Absent => "Absent",
        }
    }

    /// Outcomes that count towards the punctuality rate of `in` scans.
    pub fn is_arrival_outcome(&self) -> bool {
        !matches!(self, AttendanceStatus::EarlyLeave)
    }
}

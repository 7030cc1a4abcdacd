/// ANSI color helper utilities for terminal output.
use crate::models::{AttendanceStatus, ScanType};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Status color:
/// on time → green, late → yellow, early leave → magenta, absent → red,
/// no status → grey
pub fn color_for_status(status: Option<AttendanceStatus>) -> &'static str {
    match status {
        Some(AttendanceStatus::OnTime) => GREEN,
        Some(AttendanceStatus::Late) => YELLOW,
        Some(AttendanceStatus::EarlyLeave) => MAGENTA,
        Some(AttendanceStatus::Absent) => RED,
        None => GREY,
    }
}

/// Punctuality color: ≥ 90 green, ≥ 75 yellow, otherwise red.
/// A rate over an empty scope (0 scans) stays neutral.
pub fn color_for_rate(rate: u32, total: u32) -> &'static str {
    if total == 0 {
        GREY
    } else if rate >= 90 {
        GREEN
    } else if rate >= 75 {
        YELLOW
    } else {
        RED
    }
}

/// Grey out empty placeholders ("", "--", "0").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" || value.trim() == "0" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_scan(value: &str, kind: ScanType) -> String {
    match kind {
        ScanType::In => format!("{GREEN}{value}{RESET}"),
        ScanType::Out => format!("{CYAN}{value}{RESET}"),
    }
}

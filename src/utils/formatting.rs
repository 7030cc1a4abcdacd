//! Formatting utilities used for CLI and export outputs.

use crate::models::{AttendanceStatus, ScanType};
use crate::utils::colors::{RESET, color_for_status, colorize_scan};
use regex::Regex;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI regex"));

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Truncate to `max` visible chars, ending with "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Label used in tables and exports; unclassified scans show as "--".
pub fn status_label(status: Option<AttendanceStatus>) -> &'static str {
    status.map(|s| s.label()).unwrap_or("--")
}

pub fn status_badge(status: Option<AttendanceStatus>) -> String {
    format!("{}{}{}", color_for_status(status), status_label(status), RESET)
}

pub fn scan_badge(kind: ScanType) -> String {
    colorize_scan(kind.label(), kind)
}

pub fn percent(rate: u32) -> String {
    format!("{}%", rate)
}

//! Admin report: sweep, snapshot, aggregate, render.

use crate::config::Config;
use crate::core::analytics::aggregator::{DistributionSlice, Summary, TeacherBreakdown};
use crate::core::analytics::{LogFilter, Scope, Statistics, WeekBucket, aggregate};
use crate::core::snapshot::Snapshot;
use crate::core::sweep::SweepLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::EnrichedLog;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, color_for_rate, color_for_status, colorize_optional};
use crate::utils::date::format_date;
use crate::utils::formatting::{bold, percent, scan_badge, status_badge, truncate};
use crate::utils::table::Table;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub struct ReportOptions {
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub teacher_id: Option<String>,
    pub classroom_id: Option<String>,
    pub weeks: usize,
    pub zero_fill: bool,
}

/// The last `days` days ending on `today`.
pub fn default_bounds(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(days.max(1) - 1), today)
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn compute(
        pool: &mut DbPool,
        cfg: &Config,
        opts: &ReportOptions,
        now: NaiveDateTime,
    ) -> AppResult<(Snapshot, Statistics)> {
        if cfg.auto_mark_absent {
            let (from, to) = opts
                .bounds
                .unwrap_or_else(|| default_bounds(now.date(), cfg.report_days));
            SweepLogic::run(pool, from, to, now, false)?;
        }

        let snapshot = Snapshot::load(&pool.conn)?;

        let mut filter = LogFilter::new().bounds(opts.bounds);
        if let Some(t) = &opts.teacher_id {
            filter = filter.teacher(t.as_str());
        }
        if let Some(c) = &opts.classroom_id {
            filter = filter.classroom(c.as_str());
        }

        let mut scope = Scope::admin().with_filter(filter).with_week_limit(opts.weeks);
        if opts.zero_fill {
            scope = match &opts.teacher_id {
                Some(t) => scope.with_zero_fill([t.clone()]),
                None => scope.with_zero_fill(snapshot.teacher_ids()),
            };
        }

        let stats = aggregate(&snapshot.logs, &scope);
        Ok((snapshot, stats))
    }

    pub fn print(snapshot: &Snapshot, stats: &Statistics, opts: &ReportOptions) {
        let range = match opts.bounds {
            Some((from, to)) => format!("{} → {}", format_date(from), format_date(to)),
            None => "all time".to_string(),
        };
        header(format!("Attendance report ({})", range));

        print_summary(&stats.summary);
        print_weekly(&stats.weekly);
        print_distribution(&stats.distribution);
        print_breakdown(&stats.teachers, snapshot);
    }

    pub fn print_json(stats: &Statistics) -> AppResult<()> {
        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| AppError::Export(format!("cannot serialize report: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}

pub fn print_summary(s: &Summary) {
    let rate_color = color_for_rate(s.punctuality_rate, s.total_in_scans());
    println!("{}", bold("Overview"));
    println!("  {}Total scans:{}   {}", CYAN, RESET, s.total_scans);
    println!("  {}On time:{}       {}", CYAN, RESET, s.on_time_count);
    println!("  {}Late:{}          {}", CYAN, RESET, s.late_count);
    println!("  {}Absent:{}        {}", CYAN, RESET, s.absent_count);
    println!("  {}Early leave:{}   {}", CYAN, RESET, s.early_leave_count);
    println!(
        "  {}Punctuality:{}   {}{}{}",
        CYAN,
        RESET,
        rate_color,
        percent(s.punctuality_rate),
        RESET
    );
    println!();
}

pub fn print_weekly(weeks: &[WeekBucket]) {
    println!("{}", bold("Weekly trend"));
    if weeks.is_empty() {
        info("No classified arrivals in range.");
        println!();
        return;
    }

    let mut t = Table::new(["Week of", "On Time", "Late", "Absent", "Rate"]);
    for w in weeks {
        let rate = w.counts.punctuality_rate();
        t.add_row(vec![
            format_date(w.week_start),
            colorize_optional(&w.counts.on_time.to_string()),
            colorize_optional(&w.counts.late.to_string()),
            colorize_optional(&w.counts.absent.to_string()),
            format!("{}{}{}", color_for_rate(rate, w.counts.total()), percent(rate), RESET),
        ]);
    }
    t.print();
    println!();
}

pub fn print_distribution(slices: &[DistributionSlice]) {
    println!("{}", bold("Status distribution"));
    if slices.is_empty() {
        info("Nothing to show.");
        println!();
        return;
    }

    let total: u32 = slices.iter().map(|s| s.value).sum();
    for s in slices {
        let share = (s.value as f64 / total.max(1) as f64) * 100.0;
        let bar = "█".repeat(((share / 5.0).round() as usize).max(1));
        println!(
            "  {:<12} {:>4}  {}{}{} {:.0}%",
            s.label,
            s.value,
            color_for_status(Some(s.status)),
            bar,
            RESET,
            share
        );
    }
    println!();
}

pub fn print_breakdown(rows: &[TeacherBreakdown], snapshot: &Snapshot) {
    println!("{}", bold("Per teacher"));
    if rows.is_empty() {
        info("No teacher has classified arrivals in range.");
        println!();
        return;
    }

    let mut t = Table::new(["Teacher", "On Time", "Late", "Absent", "Total", "Rate"]);
    for r in rows {
        t.add_row(vec![
            truncate(snapshot.teacher_name(&r.teacher_id), 28),
            colorize_optional(&r.counts.on_time.to_string()),
            colorize_optional(&r.counts.late.to_string()),
            colorize_optional(&r.counts.absent.to_string()),
            r.total.to_string(),
            format!(
                "{}{}{}",
                color_for_rate(r.punctuality_rate, r.total),
                percent(r.punctuality_rate),
                RESET
            ),
        ]);
    }
    t.print();
    println!();
}

pub fn print_logs(logs: &[EnrichedLog<'_>]) {
    if logs.is_empty() {
        info("No attendance logs found.");
        return;
    }

    let mut t = Table::new(["Date", "Time", "Teacher", "Classroom", "Scan", "Status", "Source"]);
    for e in logs {
        t.add_row(vec![
            e.log.date_str(),
            e.log.time_str(),
            truncate(e.teacher_name(), 24),
            truncate(e.classroom_name(), 20),
            scan_badge(e.log.scan_type),
            status_badge(e.log.status),
            e.log.source.to_db_str().to_string(),
        ]);
    }
    t.print();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_cover_n_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 30).unwrap();
        let (from, to) = default_bounds(today, 30);
        assert_eq!(to, today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(default_bounds(today, 0).0, today);
    }
}

// src/export/logic.rs

use crate::core::analytics::{LogFilter, Scope, aggregate};
use crate::core::snapshot::Snapshot;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{LogExport, Tabular, TeacherStatsExport};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use crate::utils::range::parse_range;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance logs or per-teacher statistics.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"`, or any expression `parse_range` accepts
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and `from:to` pairs of those)
    ///
    /// Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        target: ExportTarget,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => parse_range(r)?,
        };

        let snapshot = Snapshot::load(&pool.conn)?;

        let rows = match target {
            ExportTarget::Logs => {
                let records = log_records(&snapshot, bounds);
                if records.is_empty() {
                    warning("No attendance logs found for the selected range.");
                }
                write(&records, format, "Logs", path)?;
                records.len()
            }
            ExportTarget::Teachers => {
                let records = teacher_records(&snapshot, bounds);
                write(&records, format, "Teachers", path)?;
                records.len()
            }
        };

        ttlog_or_warn(
            &pool.conn,
            "export",
            file,
            &format!("{} {} row(s) as {}", rows, target_name(target), format.as_str()),
        );

        Ok(rows)
    }
}

fn target_name(target: ExportTarget) -> &'static str {
    match target {
        ExportTarget::Logs => "log",
        ExportTarget::Teachers => "teacher",
    }
}

fn write<T: Tabular>(records: &[T], format: ExportFormat, sheet: &str, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(records, path),
        ExportFormat::Json => export_json(records, path),
        ExportFormat::Xlsx => export_xlsx(records, sheet, path),
    }
}

/// Logs in range, by date then scan time.
pub(crate) fn log_records(snapshot: &Snapshot, bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<LogExport> {
    let filter = LogFilter::new().bounds(bounds);
    let mut logs = filter.apply(&snapshot.logs);
    logs.sort_by(|a, b| a.date.cmp(&b.date).then(a.scan_time.cmp(&b.scan_time)));

    snapshot.enrich(logs).iter().map(LogExport::from).collect()
}

/// Every known teacher, including those without classified arrivals.
pub(crate) fn teacher_records(
    snapshot: &Snapshot,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<TeacherStatsExport> {
    let scope = Scope::admin()
        .with_filter(LogFilter::new().bounds(bounds))
        .with_zero_fill(snapshot.teacher_ids());

    aggregate(&snapshot.logs, &scope)
        .teachers
        .iter()
        .map(|row| TeacherStatsExport::new(row, snapshot.teacher_name(&row.teacher_id)))
        .collect()
}

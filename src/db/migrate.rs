//! Versioned schema migrations.
//!
//! Each migration is applied once and recorded as a `migration_applied` row in
//! the internal `log` table, keyed by its version string.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, params};

pub struct Migration {
    pub version: &'static str,
    pub description: &'static str,
    sql: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_teachers",
        description: "Created teachers collection",
        sql: r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            rfid_id     TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_classrooms",
        description: "Created classrooms collection",
        sql: r#"
        CREATE TABLE IF NOT EXISTS classrooms (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            location    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0003_create_schedules",
        description: "Created schedules collection",
        sql: r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id                    TEXT PRIMARY KEY,
            teacher_id            TEXT NOT NULL,
            classroom_id          TEXT NOT NULL,
            day_of_week           INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time            TEXT NOT NULL,
            end_time              TEXT NOT NULL,
            grace_period_minutes  INTEGER NOT NULL DEFAULT 10,
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_teacher_day ON schedules(teacher_id, day_of_week);
        "#,
    },
    Migration {
        version: "20250301_0004_create_attendance_logs",
        description: "Created attendance_logs collection",
        sql: r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            id            TEXT PRIMARY KEY,
            teacher_id    TEXT NOT NULL,
            classroom_id  TEXT NOT NULL,
            schedule_id   TEXT,
            date          TEXT NOT NULL,
            scan_time     TEXT NOT NULL,
            scan_type     TEXT NOT NULL CHECK(scan_type IN ('in','out')),
            status        TEXT CHECK(status IN ('on_time','late','early_leave','absent')),
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_logs_date ON attendance_logs(date);
        CREATE INDEX IF NOT EXISTS idx_logs_teacher_date ON attendance_logs(teacher_id, date);
        "#,
    },
    Migration {
        version: "20250412_0005_add_log_source",
        description: "Added source column to attendance_logs",
        sql: r#"
        ALTER TABLE attendance_logs ADD COLUMN source TEXT NOT NULL DEFAULT 'rfid';
        "#,
    },
    Migration {
        version: "20250520_0006_create_notifications",
        description: "Created notifications collection",
        sql: r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            user_role   TEXT NOT NULL,
            title       TEXT NOT NULL,
            message     TEXT NOT NULL,
            type        TEXT NOT NULL,
            category    TEXT NOT NULL,
            read        INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id);
        "#,
    },
];

/// The `log` table hosts both the audit trail and the migration ledger, so it
/// is created outside the versioned list.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Versions not yet recorded in the ledger, in application order.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static Migration>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m);
        }
    }
    Ok(out)
}

/// Apply every pending migration. Returns how many were applied.
///
/// `quiet` suppresses the per-migration message; the pool opens the store
/// on every command and must not chatter.
pub fn run_pending_migrations(conn: &Connection, quiet: bool) -> AppResult<usize> {
    let pending = pending_migrations(conn)?;

    for m in &pending {
        apply(conn, m)?;
        if !quiet {
            success(format!("Migration applied: {} → {}", m.version, m.description));
        }
    }

    Ok(pending.len())
}

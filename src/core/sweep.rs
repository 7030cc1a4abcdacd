//! Persisting the absence sweep.

use crate::core::analytics::sweep_absences;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store;
use crate::errors::AppResult;
use crate::models::{AttendanceLog, Schedule};
use crate::utils::date::format_date;
use chrono::{NaiveDate, NaiveDateTime};

pub struct SweepLogic;

impl SweepLogic {
    /// Derive absences for `from..=to` as of `now`. Unless `dry_run`, they are
    /// written in one transaction together with an audit line.
    pub fn run(
        pool: &mut DbPool,
        from: NaiveDate,
        to: NaiveDate,
        now: NaiveDateTime,
        dry_run: bool,
    ) -> AppResult<Vec<AttendanceLog>> {
        let schedules: Vec<Schedule> = store::list(&pool.conn, None)?;
        let logs: Vec<AttendanceLog> = store::list(&pool.conn, None)?;

        let absences = sweep_absences(&schedules, &logs, from, to, now);
        if dry_run || absences.is_empty() {
            return Ok(absences);
        }

        pool.with_tx(|conn| {
            let mut saved = Vec::with_capacity(absences.len());
            for a in absences {
                saved.push(store::create(conn, a)?);
            }
            ttlog(
                conn,
                "sweep",
                &format!("{}:{}", format_date(from), format_date(to)),
                &format!("{} absence(s) recorded", saved.len()),
            )?;
            Ok(saved)
        })
    }
}

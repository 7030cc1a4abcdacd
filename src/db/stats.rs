use crate::db::pool::DbPool;
use crate::db::store::{self, Collection};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(&pool.path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) RECORDS PER COLLECTION
    //
    println!("{}• Records:{}", CYAN, RESET);
    for c in Collection::ALL {
        let n = store::count(&pool.conn, c)?;
        println!("    {:<16} {}{}{}", c.table(), GREEN, n, RESET);
    }

    //
    // 3) ATTENDANCE DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM attendance_logs", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM attendance_logs", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt = |d: &Option<String>| d.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Attendance range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&first_date));
    println!("    to:   {}", fmt(&last_date));

    //
    // 4) AVERAGE SCANS/DAY
    //
    if let (Some(f), Some(l)) = (first_date.as_deref(), last_date.as_deref())
        && let (Some(d1), Some(d2)) = (parse_date(f), parse_date(l))
    {
        let days = (d2 - d1).num_days().max(1);
        let scans = store::count(&pool.conn, Collection::AttendanceLogs)?;
        let avg = scans as f64 / days as f64;
        println!("{}• Average scans/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

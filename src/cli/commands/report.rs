use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{ReportLogic, ReportOptions, default_bounds};
use crate::db::pool::DbPool;
use crate::db::watch::StoreWatcher;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::range::parse_range;
use chrono::Local;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        range,
        teacher,
        classroom,
        weeks,
        zero_fill,
        json,
        watch,
    } = cmd
    {
        let now = Local::now().naive_local();

        let bounds = match range {
            Some(r) => parse_range(r)?,
            None => Some(default_bounds(now.date(), cfg.report_days)),
        };

        let opts = ReportOptions {
            bounds,
            teacher_id: teacher.clone(),
            classroom_id: classroom.clone(),
            weeks: weeks.unwrap_or(cfg.admin_report_weeks),
            zero_fill: *zero_fill,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        render(&mut pool, cfg, &opts, *json)?;

        if let Some(secs) = watch {
            let mut watcher = StoreWatcher::new(&pool.conn)?;
            info(format!("Watching for changes every {}s (Ctrl+C to stop)…", secs));
            loop {
                watcher.wait(&pool.conn, Duration::from_secs((*secs).max(1)))?;
                render(&mut pool, cfg, &opts, *json)?;
            }
        }
    }

    Ok(())
}

fn render(pool: &mut DbPool, cfg: &Config, opts: &ReportOptions, json: bool) -> AppResult<()> {
    let now = Local::now().naive_local();
    let (snapshot, stats) = ReportLogic::compute(pool, cfg, opts, now)?;
    if json {
        ReportLogic::print_json(&stats)
    } else {
        ReportLogic::print(&snapshot, &stats, opts);
        Ok(())
    }
}

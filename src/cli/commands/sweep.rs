use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{default_bounds, print_logs};
use crate::core::snapshot::Snapshot;
use crate::core::sweep::SweepLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::range::parse_range;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep { range, dry_run } = cmd {
        let now = Local::now().naive_local();

        let parsed = match range {
            Some(r) => parse_range(r)?,
            None => None,
        };
        // `all` still needs finite bounds: the sweep walks every day
        let (from, to) = parsed.unwrap_or_else(|| default_bounds(now.date(), cfg.report_days));

        let mut pool = DbPool::new(&cfg.database)?;
        let absences = SweepLogic::run(&mut pool, from, to.min(now.date()), now, *dry_run)?;

        if absences.is_empty() {
            info("No missed classes to record.");
            return Ok(());
        }

        let snapshot = Snapshot::load(&pool.conn)?;
        print_logs(&snapshot.enrich(absences.iter()));

        if *dry_run {
            info(format!("{} absence(s) would be recorded (dry run).", absences.len()));
        } else {
            success(format!("{} absence(s) recorded.", absences.len()));
        }
    }

    Ok(())
}

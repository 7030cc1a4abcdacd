use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::Dashboard;
use crate::core::snapshot::Snapshot;
use crate::core::sweep::SweepLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard = cmd {
        let now = Local::now().naive_local();
        let mut pool = DbPool::new(&cfg.database)?;

        if cfg.auto_mark_absent {
            SweepLogic::run(&mut pool, now.date(), now.date(), now, false)?;
        }

        let snapshot = Snapshot::load(&pool.conn)?;
        Dashboard::build(&snapshot, now.date(), cfg.recent_limit).print(&snapshot);
    }

    Ok(())
}

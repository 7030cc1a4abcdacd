use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::LogFilter;
use crate::core::dashboard::recent_logs;
use crate::core::report::print_logs;
use crate::core::snapshot::Snapshot;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::parse_date_field;
use crate::utils::range::parse_range;

pub const DEFAULT_LIMIT: usize = 100;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logs {
        teacher,
        classroom,
        status,
        date,
        range,
        limit,
    } = cmd
    {
        let mut filter = LogFilter::new();
        if let Some(t) = teacher {
            filter = filter.teacher(t.as_str());
        }
        if let Some(c) = classroom {
            filter = filter.classroom(c.as_str());
        }
        if let Some(s) = status {
            filter = filter.status(*s);
        }
        if let Some(d) = date {
            filter = filter.on(parse_date_field("date", d)?);
        }
        if let Some(r) = range {
            filter = filter.bounds(parse_range(r)?);
        }

        let pool = DbPool::new(&cfg.database)?;
        let snapshot = Snapshot::load(&pool.conn)?;

        let logs = recent_logs(filter.apply(&snapshot.logs), limit.unwrap_or(DEFAULT_LIMIT));

        print_logs(&snapshot.enrich(logs));
    }

    Ok(())
}

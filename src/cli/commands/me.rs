use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::snapshot::Snapshot;
use crate::core::teacher_view::TeacherView;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Me {
        teacher,
        month,
        year,
    } = cmd
    {
        let teacher_id = teacher.as_deref().unwrap_or(&cfg.teacher_id);

        let pool = DbPool::new(&cfg.database)?;
        let snapshot = Snapshot::load(&pool.conn)?;

        let view = TeacherView::build(
            &snapshot,
            teacher_id,
            *year,
            *month,
            cfg.teacher_report_weeks,
            Local::now().naive_local(),
        )?;
        view.print(&snapshot);
    }

    Ok(())
}

use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::roster::{NewSlot, ScheduleLogic};
use crate::core::snapshot::Snapshot;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::date::parse_day;
use crate::utils::table::Table;
use crate::utils::time::{format_12h, parse_clock};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ScheduleAction::Add {
                teacher,
                room,
                day,
                start,
                end,
                grace,
            } => {
                let slot = NewSlot {
                    teacher_id: teacher.clone(),
                    classroom_id: room.clone(),
                    day_of_week: parse_day("day_of_week", day)?,
                    start_time: parse_clock("start_time", start)?,
                    end_time: parse_clock("end_time", end)?,
                    grace_period_minutes: grace.unwrap_or(cfg.default_grace_period),
                };
                let s = ScheduleLogic::add(&mut pool, slot)?;
                success(format!(
                    "Slot {} added: {} {}–{} (grace {}m)",
                    s.id,
                    s.day_name(),
                    format_12h(s.start_time),
                    format_12h(s.end_time),
                    s.grace_period_minutes
                ));
            }

            ScheduleAction::List { teacher } => {
                let slots = ScheduleLogic::list(&pool, teacher.as_deref())?;
                if slots.is_empty() {
                    info("No schedule slots found.");
                    return Ok(());
                }
                let snapshot = Snapshot::load(&pool.conn)?;
                let mut table = Table::new(["Id", "Day", "Start", "End", "Grace", "Teacher", "Classroom"]);
                for s in &slots {
                    table.add_row(vec![
                        s.id.clone(),
                        s.day_name().to_string(),
                        format_12h(s.start_time),
                        format_12h(s.end_time),
                        format!("{}m", s.grace_period_minutes),
                        snapshot.teacher_name(&s.teacher_id).to_string(),
                        snapshot.classroom_name(&s.classroom_id).to_string(),
                    ]);
                }
                table.print();
            }

            ScheduleAction::Del { id, yes } => {
                if !*yes && !confirm(&format!("Delete schedule slot {}?", id)) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                ScheduleLogic::del(&mut pool, id)?;
                success(format!("Schedule slot {} has been deleted.", id));
            }
        }
    }

    Ok(())
}

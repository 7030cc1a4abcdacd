use crate::cli::parser::{Commands, TeacherAction};
use crate::config::Config;
use crate::core::roster::TeacherLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Teacher { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            TeacherAction::Add {
                name,
                email,
                rfid,
                id,
            } => {
                let t = TeacherLogic::add(&mut pool, id.clone(), name, email, rfid)?;
                success(format!("Teacher '{}' added with id {}", t.name, t.id));
            }

            TeacherAction::List => {
                let teachers = TeacherLogic::list(&pool)?;
                if teachers.is_empty() {
                    info("No teachers registered.");
                    return Ok(());
                }
                let mut table = Table::new(["Id", "Name", "Email", "Badge"]);
                for t in &teachers {
                    table.add_row(vec![
                        t.id.clone(),
                        t.name.clone(),
                        t.email.clone(),
                        t.rfid_id.clone(),
                    ]);
                }
                table.print();
            }

            TeacherAction::Del { id, yes } => {
                if !*yes
                    && !confirm(&format!(
                        "Delete teacher {}? Their attendance history is kept.",
                        id
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }
                let t = TeacherLogic::del(&mut pool, id)?;
                success(format!("Teacher '{}' has been deleted.", t.name));
            }
        }
    }

    Ok(())
}

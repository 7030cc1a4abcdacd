use crate::cli::parser::{ClassroomAction, Commands};
use crate::config::Config;
use crate::core::roster::ClassroomLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Classroom { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ClassroomAction::Add { name, location, id } => {
                let c = ClassroomLogic::add(&mut pool, id.clone(), name, location)?;
                success(format!("Classroom '{}' added with id {}", c.name, c.id));
            }

            ClassroomAction::List => {
                let rooms = ClassroomLogic::list(&pool)?;
                if rooms.is_empty() {
                    info("No classrooms registered.");
                    return Ok(());
                }
                let mut table = Table::new(["Id", "Name", "Location"]);
                for c in &rooms {
                    table.add_row(vec![c.id.clone(), c.name.clone(), c.location.clone()]);
                }
                table.print();
            }

            ClassroomAction::Del { id, yes } => {
                if !*yes && !confirm(&format!("Delete classroom {}?", id)) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                let c = ClassroomLogic::del(&mut pool, id)?;
                success(format!("Classroom '{}' has been deleted.", c.name));
            }
        }
    }

    Ok(())
}

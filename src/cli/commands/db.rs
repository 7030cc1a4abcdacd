use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use rusqlite::Connection;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        if !(*migrate || *check || *vacuum || *show_info) {
            info("Nothing to do. Use --migrate, --check, --vacuum or --info.");
            return Ok(());
        }

        //
        // 1) MIGRATE
        //
        // Opened without DbPool so the pending list is visible before it runs.
        if *migrate {
            if let Some(parent) = std::path::Path::new(&cfg.database).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let conn = Connection::open(&cfg.database)?;
            let pending = pending_migrations(&conn)?;
            println!("{}▶ Running migrations… ({} pending){}", CYAN, pending.len(), RESET);
            run_pending_migrations(&conn, false)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        let pool = DbPool::new(&cfg.database)?;

        //
        // 2) INFO
        //
        if *show_info {
            stats::print_db_info(&pool)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}

use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Schema creation and upgrades are owned by the migration ledger; this only
/// applies whatever is pending.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn, false)?;
    Ok(())
}

/// Same as [`init_db`] without progress output. Used when opening the store
/// for ordinary commands.
pub fn ensure_schema(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn, true)?;
    Ok(())
}

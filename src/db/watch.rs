//! Change detection for live views.
//!
//! SQLite bumps `PRAGMA data_version` on a connection whenever *another*
//! connection commits to the same file. Polling it is enough to know when a
//! snapshot has gone stale.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::thread;
use std::time::Duration;

pub struct StoreWatcher {
    last: i64,
}

fn data_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA data_version", [], |row| row.get(0))?)
}

impl StoreWatcher {
    pub fn new(conn: &Connection) -> AppResult<Self> {
        Ok(Self {
            last: data_version(conn)?,
        })
    }

    /// True once per external commit batch since the previous call.
    pub fn changed(&mut self, conn: &Connection) -> AppResult<bool> {
        let now = data_version(conn)?;
        if now != self.last {
            self.last = now;
            return Ok(true);
        }
        Ok(false)
    }

    /// Block until the store changes, polling every `interval`.
    pub fn wait(&mut self, conn: &Connection, interval: Duration) -> AppResult<()> {
        while !self.changed(conn)? {
            thread::sleep(interval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sees_commits_from_other_connections() {
        let path = std::env::temp_dir().join(format!("rollcall-watch-{}.sqlite", uuid::Uuid::new_v4()));
        let reader = Connection::open(&path).unwrap();
        let writer = Connection::open(&path).unwrap();
        writer.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();

        let mut w = StoreWatcher::new(&reader).unwrap();
        assert!(!w.changed(&reader).unwrap());

        writer.execute("INSERT INTO t VALUES (1)", []).unwrap();
        assert!(w.changed(&reader).unwrap());
        assert!(!w.changed(&reader).unwrap());

        drop(reader);
        drop(writer);
        let _ = std::fs::remove_file(path);
    }
}

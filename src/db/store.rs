//! Document-style access to the named collections.
//!
//! Every collection is a table keyed by an opaque string id. Records are
//! created whole, listed with at most one equality filter and deleted by id.

use crate::errors::{AppError, AppResult};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Teachers,
    Classrooms,
    Schedules,
    AttendanceLogs,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Teachers,
        Collection::Classrooms,
        Collection::Schedules,
        Collection::AttendanceLogs,
        Collection::Notifications,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Collection::Teachers => "teachers",
            Collection::Classrooms => "classrooms",
            Collection::Schedules => "schedules",
            Collection::AttendanceLogs => "attendance_logs",
            Collection::Notifications => "notifications",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Collection::Teachers => &["id", "name", "email", "rfid_id", "created_at"],
            Collection::Classrooms => &["id", "name", "location", "created_at"],
            Collection::Schedules => &[
                "id",
                "teacher_id",
                "classroom_id",
                "day_of_week",
                "start_time",
                "end_time",
                "grace_period_minutes",
                "created_at",
            ],
            Collection::AttendanceLogs => &[
                "id",
                "teacher_id",
                "classroom_id",
                "schedule_id",
                "date",
                "scan_time",
                "scan_type",
                "status",
                "source",
                "created_at",
            ],
            Collection::Notifications => &[
                "id",
                "user_id",
                "user_role",
                "title",
                "message",
                "type",
                "category",
                "read",
                "created_at",
            ],
        }
    }

    fn select_list(&self) -> String {
        self.columns().join(", ")
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Single-field equality filter, checked against the collection's columns
/// before it reaches SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn eq(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }

    fn column(&self, collection: Collection) -> AppResult<&'static str> {
        collection
            .columns()
            .iter()
            .find(|c| **c == self.field)
            .copied()
            .ok_or_else(|| {
                AppError::validation(
                    "filter",
                    format!("'{}' is not a field of {}", self.field, collection),
                )
            })
    }
}

/// A typed record stored in one collection.
pub trait Document: Sized {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Called once by [`create`] before the insert.
    fn assign(&mut self, id: String, created_at: String);

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize>;
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// UTC with a fixed fraction width, so string order is chronological.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Map a field that failed to parse into a row error carrying the
/// validation detail. [`lift`] unwraps it again on the way out.
pub fn invalid_field(index: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

/// Surface row-mapping validation failures as `AppError::Validation`
/// instead of an opaque database error.
pub fn lift(err: rusqlite::Error) -> AppError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(idx, ty, inner) => {
            match inner.downcast::<AppError>() {
                Ok(app) => *app,
                Err(other) => AppError::Db(rusqlite::Error::FromSqlConversionFailure(idx, ty, other)),
            }
        }
        other => AppError::Db(other),
    }
}

/// Insert `doc`, assigning an id (unless preset) and a creation stamp.
pub fn create<D: Document>(conn: &Connection, mut doc: D) -> AppResult<D> {
    let id = if doc.id().is_empty() {
        new_id()
    } else {
        doc.id().to_string()
    };
    doc.assign(id, now_stamp());
    doc.insert(conn).map_err(lift)?;
    Ok(doc)
}

/// Every record of the collection, oldest first, optionally filtered.
pub fn list<D: Document>(conn: &Connection, filter: Option<&FieldFilter>) -> AppResult<Vec<D>> {
    let collection = D::COLLECTION;
    let mut sql = format!("SELECT {} FROM {}", collection.select_list(), collection.table());

    let value = match filter {
        Some(f) => {
            sql.push_str(&format!(" WHERE {} = ?1", f.column(collection)?));
            Some(f.value.as_str())
        }
        None => None,
    };
    sql.push_str(" ORDER BY created_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = match value {
        Some(v) => stmt.query_map([v], D::from_row)?,
        None => stmt.query_map([], D::from_row)?,
    };

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(lift)?);
    }
    Ok(out)
}

pub fn get<D: Document>(conn: &Connection, id: &str) -> AppResult<D> {
    list::<D>(conn, Some(&FieldFilter::eq("id", id)))?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound {
            collection: D::COLLECTION.table(),
            id: id.to_string(),
        })
}

pub fn delete(conn: &Connection, collection: Collection, id: &str) -> AppResult<()> {
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1", collection.table()),
        params![id],
    )?;

    if n == 0 {
        return Err(AppError::NotFound {
            collection: collection.table(),
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn count(conn: &Connection, collection: Collection) -> AppResult<i64> {
    let n = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", collection.table()),
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::models::{Classroom, Teacher};

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        run_pending_migrations(&c, true).unwrap();
        c
    }

    #[test]
    fn create_assigns_id_and_stamp() {
        let c = conn();
        let room = create(&c, Classroom::new(None, "Lab 1", "North wing").unwrap()).unwrap();
        assert!(!room.id.is_empty());
        assert!(!room.created_at.is_empty());

        let back: Classroom = get(&c, &room.id).unwrap();
        assert_eq!(back, room);
    }

    #[test]
    fn preset_id_is_kept() {
        let c = conn();
        let t = Teacher::new(Some("teacher-1".into()), "Ada Byron", "ada@school.edu", "RF-1").unwrap();
        let t = create(&c, t).unwrap();
        assert_eq!(t.id, "teacher-1");
    }

    #[test]
    fn filter_rejects_unknown_fields() {
        let c = conn();
        let err = list::<Classroom>(&c, Some(&FieldFilter::eq("color", "red"))).unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "filter", .. }));
    }

    #[test]
    fn list_filters_by_equality() {
        let c = conn();
        create(&c, Classroom::new(None, "Lab 1", "North").unwrap()).unwrap();
        create(&c, Classroom::new(None, "Lab 2", "South").unwrap()).unwrap();

        let north: Vec<Classroom> = list(&c, Some(&FieldFilter::eq("location", "North"))).unwrap();
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].name, "Lab 1");
        assert_eq!(count(&c, Collection::Classrooms).unwrap(), 2);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let c = conn();
        assert!(matches!(
            delete(&c, Collection::Teachers, "nope"),
            Err(AppError::NotFound { collection: "teachers", .. })
        ));
    }

    #[test]
    fn malformed_rows_surface_as_validation() {
        let c = conn();
        c.execute(
            "INSERT INTO schedules (id, teacher_id, classroom_id, day_of_week, start_time, end_time, grace_period_minutes, created_at)
             VALUES ('s1', 't1', 'c1', 1, '8 am', '09:00', 10, '2024-01-01T00:00:00+00:00')",
            [],
        )
        .unwrap();
        let err = list::<crate::models::Schedule>(&c, None).unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "start_time", .. }));
    }

    #[test]
    fn stamps_are_utc_and_sort_chronologically() {
        let first = now_stamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = now_stamp();
        assert!(first.ends_with('Z'));
        assert_eq!(first.len(), second.len());
        assert!(first < second);
    }
}

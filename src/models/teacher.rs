use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email regex"));

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rfid_id: String, // unique badge identifier
    pub created_at: String,
}

impl Teacher {
    /// Build a teacher from admin input. `id` and `created_at` are assigned
    /// by the store on create unless an explicit id is requested.
    pub fn new(id: Option<String>, name: &str, email: &str, rfid_id: &str) -> AppResult<Self> {
        let teacher = Self {
            id: id.unwrap_or_default(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            rfid_id: rfid_id.trim().to_string(),
            created_at: String::new(),
        };
        teacher.validate()?;
        Ok(teacher)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.chars().count() < 2 {
            return Err(AppError::validation(
                "name",
                "must be at least 2 characters",
            ));
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(AppError::validation(
                "email",
                format!("'{}' is not a valid email address", self.email),
            ));
        }
        if self.rfid_id.is_empty() {
            return Err(AppError::validation("rfid_id", "RFID ID is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_names_and_bad_emails() {
        assert!(Teacher::new(None, "A", "a@school.edu", "RF1").is_err());
        assert!(Teacher::new(None, "Ada", "not-an-email", "RF1").is_err());
        assert!(Teacher::new(None, "Ada", "ada@school.edu", "  ").is_err());
    }

    #[test]
    fn trims_input() {
        let t = Teacher::new(Some("teacher-1".into()), " Ada ", "ada@school.edu", " RF1 ").unwrap();
        assert_eq!(t.name, "Ada");
        assert_eq!(t.rfid_id, "RF1");
        assert_eq!(t.id, "teacher-1");
    }
}

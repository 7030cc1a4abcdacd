use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Classroom {
    pub id: String,
    pub name: String,     // e.g. "Room 101", "Lab A"
    pub location: String, // e.g. "Building A, 2nd Floor"
    pub created_at: String,
}

impl Classroom {
    pub fn new(id: Option<String>, name: &str, location: &str) -> AppResult<Self> {
        let classroom = Self {
            id: id.unwrap_or_default(),
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            created_at: String::new(),
        };
        classroom.validate()?;
        Ok(classroom)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.name.is_empty() {
            return Err(AppError::validation("name", "classroom name is required"));
        }
        if self.location.is_empty() {
            return Err(AppError::validation("location", "location is required"));
        }
        Ok(())
    }
}

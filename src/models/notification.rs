use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "info" => Some(NotificationType::Info),
            "success" => Some(NotificationType::Success),
            "warning" => Some(NotificationType::Warning),
            "error" => Some(NotificationType::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Attendance,
    Schedule,
    System,
}

impl NotificationCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            NotificationCategory::Attendance => "attendance",
            NotificationCategory::Schedule => "schedule",
            NotificationCategory::System => "system",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "attendance" => Some(NotificationCategory::Attendance),
            "schedule" => Some(NotificationCategory::Schedule),
            "system" => Some(NotificationCategory::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub user_role: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: String,
}

impl Notification {
    pub fn for_teacher(
        user_id: &str,
        title: &str,
        message: &str,
        kind: NotificationType,
        category: NotificationCategory,
    ) -> AppResult<Self> {
        let n = Self {
            id: String::new(),
            user_id: user_id.trim().to_string(),
            user_role: "teacher".to_string(),
            title: title.trim().to_string(),
            message: message.trim().to_string(),
            kind,
            category,
            read: false,
            created_at: String::new(),
        };
        n.validate()?;
        Ok(n)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.user_id.is_empty() {
            return Err(AppError::validation("user_id", "recipient is required"));
        }
        if self.title.is_empty() {
            return Err(AppError::validation("title", "title is required"));
        }
        if self.message.is_empty() {
            return Err(AppError::validation("message", "message is required"));
        }
        Ok(())
    }
}

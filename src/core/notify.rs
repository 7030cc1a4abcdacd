//! Notifications sent from the admin view to a teacher.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::mark_notifications_read;
use crate::db::store::{self, FieldFilter};
use crate::errors::{AppError, AppResult};
use crate::models::{Notification, NotificationCategory, NotificationType, Teacher};
use crate::utils::date::{format_date, today};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Template {
    Late,
    Absent,
    Reminder,
    Correction,
    Announcement,
}

/// Optional details substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub classroom: Option<String>,
    pub at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub category: NotificationCategory,
}

impl Template {
    pub fn expand(self, teacher_name: &str, ctx: &TemplateContext) -> Draft {
        let room = ctx.classroom.as_deref().unwrap_or("your classroom");
        let at = ctx.at.as_deref().unwrap_or("the scheduled time");

        let (title, message, kind, category) = match self {
            Template::Late => (
                "Late Arrival Recorded".to_string(),
                format!(
                    "Hello {}, you were marked late for your class in {} (scheduled at {}).",
                    teacher_name, room, at
                ),
                NotificationType::Warning,
                NotificationCategory::Attendance,
            ),
            Template::Absent => (
                "Absence Recorded".to_string(),
                format!(
                    "Hello {}, no check-in was recorded for your class in {}. Please contact the administration.",
                    teacher_name, room
                ),
                NotificationType::Error,
                NotificationCategory::Attendance,
            ),
            Template::Reminder => (
                "Class Reminder".to_string(),
                format!("Reminder: your class in {} starts at {}.", room, at),
                NotificationType::Info,
                NotificationCategory::Schedule,
            ),
            Template::Correction => (
                "Attendance Correction".to_string(),
                format!(
                    "Your attendance record for {} has been corrected to On Time.",
                    ctx.at.clone().unwrap_or_else(|| format_date(today()))
                ),
                NotificationType::Info,
                NotificationCategory::Attendance,
            ),
            Template::Announcement => (
                "School Announcement".to_string(),
                format!("Scheduled system maintenance: {}. The scanner may be unavailable.", at),
                NotificationType::Info,
                NotificationCategory::System,
            ),
        };

        Draft {
            title,
            message,
            kind,
            category,
        }
    }
}

pub struct NotifyLogic;

impl NotifyLogic {
    pub fn send(pool: &mut DbPool, teacher_id: &str, draft: Draft) -> AppResult<Notification> {
        let note = Notification::for_teacher(
            teacher_id,
            &draft.title,
            &draft.message,
            draft.kind,
            draft.category,
        )?;

        pool.with_tx(|conn| {
            let _: Teacher = store::get(conn, teacher_id)?;
            let saved = store::create(conn, note)?;
            ttlog(conn, "notify", teacher_id, &saved.title)?;
            Ok(saved)
        })
    }

    /// Build a draft from a template or from free text. Free text needs both
    /// a title and a message.
    pub fn draft(
        pool: &DbPool,
        teacher_id: &str,
        template: Option<Template>,
        ctx: &TemplateContext,
        title: Option<&str>,
        message: Option<&str>,
        kind: Option<NotificationType>,
    ) -> AppResult<Draft> {
        let teacher: Teacher = store::get(&pool.conn, teacher_id)?;

        let mut draft = match template {
            Some(t) => t.expand(&teacher.name, ctx),
            None => Draft {
                title: title
                    .ok_or_else(|| AppError::validation("title", "required without --template"))?
                    .to_string(),
                message: message
                    .ok_or_else(|| AppError::validation("message", "required without --template"))?
                    .to_string(),
                kind: NotificationType::Info,
                category: NotificationCategory::System,
            },
        };

        // explicit flags override the template text
        if let Some(t) = title {
            draft.title = t.to_string();
        }
        if let Some(m) = message {
            draft.message = m.to_string();
        }
        if let Some(k) = kind {
            draft.kind = k;
        }
        Ok(draft)
    }

    /// Newest first.
    pub fn list(pool: &mut DbPool, user_id: &str, mark_read: bool) -> AppResult<Vec<Notification>> {
        let mut notes: Vec<Notification> =
            store::list(&pool.conn, Some(&FieldFilter::eq("user_id", user_id)))?;
        notes.reverse();

        if mark_read {
            mark_notifications_read(&pool.conn, user_id)?;
        }
        Ok(notes)
    }
}

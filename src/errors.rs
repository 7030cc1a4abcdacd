//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation (ingestion boundary, classifier inputs)
    // ---------------------------
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No {collection} record with id '{id}'")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error("Unknown RFID badge: {0}")]
    UnknownBadge(String),

    #[error("RFID badge already assigned: {0}")]
    DuplicateBadge(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Shorthand used by the parsers at the ingestion boundary.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

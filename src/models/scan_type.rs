use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Direction of a badge read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    In,
    Out,
}

impl ScanType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScanType::In => "in",
            ScanType::Out => "out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(ScanType::In),
            "out" => Some(ScanType::Out),
            _ => None,
        }
    }

    /// Lenient parse for user input (`IN`, `Out`, ...).
    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
            .ok_or_else(|| AppError::validation("scan_type", format!("'{}' is not 'in' or 'out'", s)))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScanType::In => "Scan In",
            ScanType::Out => "Scan Out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, ScanType::In)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, ScanType::Out)
    }
}

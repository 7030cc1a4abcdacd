use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys a complete configuration file is expected to carry.
pub const CONFIG_KEYS: &[&str] = &[
    "database",
    "teacher_id",
    "default_grace_period",
    "admin_report_weeks",
    "teacher_report_weeks",
    "report_days",
    "recent_limit",
    "log_limit",
    "auto_mark_absent",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Identity used by the teacher view (`me`).
    #[serde(default = "default_teacher_id")]
    pub teacher_id: String,
    #[serde(default = "default_grace_period")]
    pub default_grace_period: u32,
    #[serde(default = "default_admin_weeks")]
    pub admin_report_weeks: usize,
    #[serde(default = "default_teacher_weeks")]
    pub teacher_report_weeks: usize,
    #[serde(default = "default_report_days")]
    pub report_days: i64,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
    /// Persist an absence sweep before `report` and `dashboard` aggregate.
    #[serde(default = "default_auto_mark_absent")]
    pub auto_mark_absent: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_teacher_id() -> String {
    "teacher-1".to_string()
}
fn default_grace_period() -> u32 {
    10
}
fn default_admin_weeks() -> usize {
    8
}
fn default_teacher_weeks() -> usize {
    4
}
fn default_report_days() -> i64 {
    30
}
fn default_recent_limit() -> usize {
    10
}
fn default_log_limit() -> usize {
    100
}
fn default_auto_mark_absent() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            teacher_id: default_teacher_id(),
            default_grace_period: default_grace_period(),
            admin_report_weeks: default_admin_weeks(),
            teacher_report_weeks: default_teacher_weeks(),
            report_days: default_report_days(),
            recent_limit: default_recent_limit(),
            log_limit: default_log_limit(),
            auto_mark_absent: default_auto_mark_absent(),
        }
    }
}

impl Config {
    /// `~/.rollcall`, or `./.rollcall` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rollcall")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollcall.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rollcall.sqlite")
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {}", e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize configuration: {}", e)))
    }

    /// Keys from [`CONFIG_KEYS`] absent from the YAML document (their
    /// defaults are in effect).
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {}", e)))?;

        let mapping = value.as_mapping();
        Ok(CONFIG_KEYS
            .iter()
            .filter(|k| mapping.is_none_or(|m| !m.contains_key(**k)))
            .copied()
            .collect())
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. Returns the resolved database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(config.to_yaml()?.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

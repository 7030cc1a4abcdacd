pub mod backup;
pub mod classroom;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod logs;
pub mod me;
pub mod notify;
pub mod report;
pub mod scan;
pub mod schedule;
pub mod sweep;
pub mod teacher;

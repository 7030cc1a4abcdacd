//! Attendance analytics: pure functions over in-memory snapshots.

pub mod absence;
pub mod aggregator;
pub mod classifier;
pub mod filter;
pub mod weekly;

pub use absence::sweep_absences;
pub use aggregator::{Scope, Statistics, Summary, TeacherBreakdown, aggregate, punctuality_rate};
pub use classifier::{Classification, classify, classify_raw, match_schedule};
pub use filter::LogFilter;
pub use weekly::WeekBucket;

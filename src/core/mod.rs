//! Business logic behind each command. Pure analytics live in `analytics`;
//! the `*Logic` types wire them to the store.

pub mod analytics;
pub mod backup;
pub mod dashboard;
pub mod log;
pub mod notify;
pub mod report;
pub mod roster;
pub mod scan;
pub mod snapshot;
pub mod sweep;
pub mod teacher_view;

pub mod attendance_log;
pub mod classroom;
pub mod enriched;
pub mod notification;
pub mod scan_type;
pub mod schedule;
pub mod status;
pub mod teacher;

pub use attendance_log::{AttendanceLog, LogSource};
pub use classroom::Classroom;
pub use enriched::EnrichedLog;
pub use notification::{Notification, NotificationCategory, NotificationType};
pub use scan_type::ScanType;
pub use schedule::Schedule;
pub use status::AttendanceStatus;
pub use teacher::Teacher;

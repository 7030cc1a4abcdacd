//! Admin landing page: counts, today's activity, latest scans.

use crate::core::analytics::{LogFilter, Scope, Summary, aggregate};
use crate::core::report::{print_logs, print_summary};
use crate::core::snapshot::Snapshot;
use crate::models::AttendanceLog;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, RESET};
use crate::utils::date::format_date;
use crate::utils::formatting::bold;
use chrono::NaiveDate;

pub struct Dashboard<'a> {
    pub date: NaiveDate,
    pub teachers: usize,
    pub classrooms: usize,
    pub schedules: usize,
    pub todays_scans: usize,
    pub today: Summary,
    pub recent: Vec<&'a AttendanceLog>,
}

/// The `limit` most recently ingested logs, newest first.
pub fn recent_logs<'a, I>(logs: I, limit: usize) -> Vec<&'a AttendanceLog>
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut all: Vec<&AttendanceLog> = logs.into_iter().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all.truncate(limit);
    all
}

impl<'a> Dashboard<'a> {
    pub fn build(snapshot: &'a Snapshot, today: NaiveDate, recent_limit: usize) -> Self {
        let today_scope = Scope::admin().with_filter(LogFilter::new().on(today));
        let summary = aggregate(&snapshot.logs, &today_scope).summary;

        Self {
            date: today,
            teachers: snapshot.teachers.len(),
            classrooms: snapshot.classrooms.len(),
            schedules: snapshot.schedules.len(),
            todays_scans: summary.total_scans as usize,
            today: summary,
            recent: recent_logs(&snapshot.logs, recent_limit),
        }
    }

    pub fn print(&self, snapshot: &Snapshot) {
        header(format!("Dashboard ({})", format_date(self.date)));

        println!("  {}Teachers:{}       {}", CYAN, RESET, self.teachers);
        println!("  {}Classrooms:{}     {}", CYAN, RESET, self.classrooms);
        println!("  {}Schedules:{}      {}", CYAN, RESET, self.schedules);
        println!("  {}Today's scans:{}  {}", CYAN, RESET, self.todays_scans);
        println!();

        print_summary(&self.today);

        println!("{}", bold("Recent scans"));
        print_logs(&snapshot.enrich(self.recent.iter().copied()));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, LogSource, ScanType};
    use chrono::NaiveTime;

    #[test]
    fn recent_is_ordered_by_ingestion() {
        let mk = |stamp: &str, day: u32| {
            let mut l = AttendanceLog::new(
                "t1",
                "c1",
                None,
                NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                ScanType::In,
                Some(AttendanceStatus::OnTime),
                LogSource::Rfid,
            );
            l.created_at = stamp.into();
            l
        };
        // a backfilled scan for an older date ingested last comes first
        let logs = vec![
            mk("2024-03-05T08:00:00+00:00", 5),
            mk("2024-03-06T08:00:00+00:00", 1),
            mk("2024-03-04T08:00:00+00:00", 4),
        ];
        let recent = recent_logs(&logs, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date_str(), "2024-03-01");
        assert_eq!(recent[1].date_str(), "2024-03-05");

        let mut snapshot = Snapshot::default();
        snapshot.logs = logs;
        let d = Dashboard::build(&snapshot, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 10);
        assert_eq!(d.todays_scans, 1);
        assert_eq!(d.recent.len(), 3);
    }
}

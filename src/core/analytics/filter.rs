//! Predicate composition over attendance logs. Every criterion is optional;
//! the ones that are set are combined with AND.

use crate::models::{AttendanceLog, AttendanceStatus, ScanType};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub teacher_id: Option<String>,
    pub classroom_id: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub scan_type: Option<ScanType>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teacher(mut self, id: impl Into<String>) -> Self {
        self.teacher_id = Some(id.into());
        self
    }

    pub fn classroom(mut self, id: impl Into<String>) -> Self {
        self.classroom_id = Some(id.into());
        self
    }

    pub fn status(mut self, status: AttendanceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn scan_type(mut self, scan_type: ScanType) -> Self {
        self.scan_type = Some(scan_type);
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Inclusive date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn bounds(self, bounds: Option<(NaiveDate, NaiveDate)>) -> Self {
        match bounds {
            Some((from, to)) => self.between(from, to),
            None => self,
        }
    }

    pub fn matches(&self, log: &AttendanceLog) -> bool {
        if let Some(id) = &self.teacher_id
            && &log.teacher_id != id
        {
            return false;
        }
        if let Some(id) = &self.classroom_id
            && &log.classroom_id != id
        {
            return false;
        }
        if let Some(status) = self.status
            && log.status != Some(status)
        {
            return false;
        }
        if let Some(kind) = self.scan_type
            && log.scan_type != kind
        {
            return false;
        }
        if let Some(d) = self.date
            && log.date != d
        {
            return false;
        }
        if let Some(from) = self.from
            && log.date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && log.date > to
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, logs: &'a [AttendanceLog]) -> Vec<&'a AttendanceLog> {
        logs.iter().filter(|l| self.matches(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogSource;
    use chrono::NaiveTime;

    fn log(teacher: &str, room: &str, date: &str, status: Option<AttendanceStatus>) -> AttendanceLog {
        AttendanceLog::new(
            teacher,
            room,
            Some("s1"),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            ScanType::In,
            status,
            LogSource::Rfid,
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        let logs = vec![log("t1", "c1", "2024-03-04", None)];
        assert_eq!(LogFilter::new().apply(&logs).len(), 1);
    }

    #[test]
    fn criteria_are_anded() {
        let logs = vec![
            log("t1", "c1", "2024-03-04", Some(AttendanceStatus::OnTime)),
            log("t1", "c2", "2024-03-04", Some(AttendanceStatus::OnTime)),
            log("t2", "c1", "2024-03-04", Some(AttendanceStatus::Late)),
            log("t1", "c1", "2024-03-05", Some(AttendanceStatus::Late)),
        ];

        let f = LogFilter::new().teacher("t1").classroom("c1");
        assert_eq!(f.apply(&logs).len(), 2);

        let f = f.status(AttendanceStatus::Late);
        let hits = f.apply(&logs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date_str(), "2024-03-05");
    }

    #[test]
    fn range_is_inclusive() {
        let logs = vec![
            log("t1", "c1", "2024-03-01", None),
            log("t1", "c1", "2024-03-04", None),
            log("t1", "c1", "2024-03-08", None),
            log("t1", "c1", "2024-03-09", None),
        ];
        let from = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert_eq!(LogFilter::new().between(from, to).apply(&logs).len(), 2);
        assert_eq!(LogFilter::new().on(to).apply(&logs).len(), 1);
    }
}

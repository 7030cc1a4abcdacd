use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::Classification;
use crate::core::scan::{ScanLogic, ScanRequest};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date_field;
use crate::utils::formatting::{scan_badge, status_badge};
use crate::utils::time::{format_12h, parse_optional_clock};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan {
        rfid,
        room,
        scan_type,
        date,
        time,
    } = cmd
    {
        let req = ScanRequest {
            rfid: rfid.clone(),
            classroom_id: room.clone(),
            scan_type: *scan_type,
            date: date.as_deref().map(|d| parse_date_field("date", d)).transpose()?,
            time: parse_optional_clock("scan_time", time.as_ref())?,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let outcome = ScanLogic::record(&mut pool, req)?;

        success(format!(
            "{} {} {} at {} {}",
            outcome.teacher.name,
            scan_badge(outcome.log.scan_type),
            outcome.classroom.name,
            outcome.log.date_str(),
            outcome.log.time_str()
        ));

        match (outcome.classification, &outcome.schedule) {
            (Classification::Status(_), Some(slot)) => info(format!(
                "{} (class {}–{}, grace {}m)",
                status_badge(outcome.log.status),
                format_12h(slot.start_time),
                format_12h(slot.end_time),
                slot.grace_period_minutes
            )),
            (Classification::Checkout, _) => info("Checked out after the end of class."),
            _ => warning("No scheduled class matches this scan; it is kept without a status."),
        }
    }

    Ok(())
}

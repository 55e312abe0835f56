//! Target-date resolution.
//!
//! The job may run in any machine zone but must match dates as the source
//! site prints them (`DD/MM/YYYY`) and key the store by a stable ISO date, so
//! "today" is always resolved in one fixed named time zone.

use crate::error::SyncError;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// One calendar date carried in both renderings the pipeline needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleDate {
    date: NaiveDate,
}

impl ScheduleDate {
    /// Today as observed in `tz`, not in the execution machine's local zone.
    pub fn today_in(tz: Tz) -> Self {
        Self {
            date: Utc::now().with_timezone(&tz).date_naive(),
        }
    }

    /// Parse a caller-supplied override in `YYYY-MM-DD`.
    pub fn from_iso(s: &str) -> Result<Self, SyncError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Self { date })
            .map_err(|_| SyncError::Config(format!("invalid target date (expected YYYY-MM-DD): {s}")))
    }

    /// `YYYY-MM-DD`, the store's date key.
    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `DD/MM/YYYY`, as printed in the source schedule text.
    pub fn source_format(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_iso_renders_both_formats() {
        let d = ScheduleDate::from_iso("2026-02-01").expect("date");
        assert_eq!(d.iso(), "2026-02-01");
        assert_eq!(d.source_format(), "01/02/2026");
    }

    #[test]
    fn from_iso_rejects_source_format_input() {
        assert!(ScheduleDate::from_iso("01/02/2026").is_err());
    }

    #[test]
    fn today_in_is_a_calendar_date() {
        let d = ScheduleDate::today_in(chrono_tz::Tz::UTC);
        assert_eq!(d.iso().len(), 10);
        assert_eq!(d.source_format().len(), 10);
    }

    #[test]
    fn zones_straddling_midnight_disagree_on_today() {
        // Kiritimati and Niue sit 25 hours apart; at any instant at least one
        // of them is on a different calendar date than UTC or the other.
        let east = ScheduleDate::today_in(chrono_tz::Pacific::Kiritimati);
        let west = ScheduleDate::today_in(chrono_tz::Pacific::Niue);
        assert_ne!(east.iso(), west.iso());
    }
}

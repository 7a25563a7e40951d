//! Appointment records

use super::{day_month_year, hour_minute, Record, RecordId, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Status written on every new or rescheduled appointment
pub const BOOKED: &str = "Booked";

/// A booked (or formerly booked) eye test slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub patient_name: String,    // Copied at booking time, not kept in sync
    #[serde(with = "day_month_year")]
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
    pub status: String,          // Free text, conventionally "Booked"
    pub reason: String,
}

impl Appointment {
    pub fn is_booked(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(BOOKED)
    }

    /// Does this appointment hold the given slot?
    pub fn holds_slot(&self, date: NaiveDate, time: NaiveTime) -> bool {
        self.is_booked() && self.date == date && self.time == time
    }
}

impl Record for Appointment {
    const KIND: &'static str = "Appointment";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl std::fmt::Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | patient {} ({}) | {} {} | {} | {}",
            self.id,
            self.patient_id,
            self.patient_name,
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT),
            self.status,
            self.reason
        )
    }
}

//! Prescription records

use super::{day_month_year, Record, RecordId, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub patient_name: String,
    pub details: String,
    #[serde(with = "day_month_year")]
    pub issued_on: NaiveDate,
    #[serde(with = "day_month_year")]
    pub expires_on: NaiveDate,   // Fixed at creation
}

impl Record for Prescription {
    const KIND: &'static str = "Prescription";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl std::fmt::Display for Prescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | patient {} ({}) | {} | issued {} | expires {}",
            self.id,
            self.patient_id,
            self.patient_name,
            self.details,
            self.issued_on.format(DATE_FORMAT),
            self.expires_on.format(DATE_FORMAT)
        )
    }
}

//! Inactive patients
//!
//! A patient is inactive when they have no prescription, or their most
//! recent one was issued before `now - years * 365 days`. Leap days are not
//! counted.

use super::{CascadeReport, Clinic};
use crate::data::{Patient, Prescription, RecordId};
use crate::ClinicResult;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Most recent issue date per patient
pub fn latest_issue_dates(prescriptions: &[Prescription]) -> HashMap<RecordId, NaiveDate> {
    let mut latest: HashMap<RecordId, NaiveDate> = HashMap::new();
    for p in prescriptions {
        latest
            .entry(p.patient_id)
            .and_modify(|d| *d = (*d).max(p.issued_on))
            .or_insert(p.issued_on);
    }
    latest
}

/// Dates count from midnight
pub fn is_inactive(latest: Option<NaiveDate>, threshold: NaiveDateTime) -> bool {
    match latest.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(issued) => issued < threshold,
        None => true,
    }
}

impl Clinic {
    /// Cut-off instant; anything issued before it is stale
    pub fn inactivity_threshold(&self) -> NaiveDateTime {
        self.now() - Duration::days(self.rules.inactive_after_years * 365)
    }

    pub fn inactive_patients(&self) -> ClinicResult<Vec<Patient>> {
        let latest = latest_issue_dates(&self.prescriptions.records()?);
        let threshold = self.inactivity_threshold();
        Ok(self
            .patients
            .records()?
            .into_iter()
            .filter(|p| is_inactive(latest.get(&p.id).copied(), threshold))
            .collect())
    }

    /// Delete every inactive patient at once, cascading to their records
    pub fn purge_inactive_patients(&self) -> ClinicResult<CascadeReport> {
        let ids: HashSet<RecordId> = self.inactive_patients()?.iter().map(|p| p.id).collect();
        if ids.is_empty() {
            return Ok(CascadeReport::default());
        }
        info!(count = ids.len(), "purging inactive patients");
        self.remove_patients(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn threshold_comparison() {
        let threshold = day(2021, 1, 16).and_hms_opt(12, 0, 0).unwrap();
        assert!(is_inactive(None, threshold));
        assert!(is_inactive(Some(day(2021, 1, 16)), threshold));
        assert!(!is_inactive(Some(day(2021, 1, 17)), threshold));
    }

    #[test]
    fn latest_date_wins() {
        let base = Prescription {
            id: RecordId(1),
            patient_id: RecordId(9),
            patient_name: "Jane Doe".to_string(),
            details: "distance".to_string(),
            issued_on: day(2019, 5, 1),
            expires_on: day(2020, 4, 30),
        };
        let newer = Prescription {
            id: RecordId(2),
            issued_on: day(2023, 2, 1),
            ..base.clone()
        };
        let latest = latest_issue_dates(&[newer, base]);
        assert_eq!(latest.get(&RecordId(9)), Some(&day(2023, 2, 1)));
    }
}

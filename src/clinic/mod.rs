//! Clinic record operations
//!
//! [`Clinic`] owns the three collections and the practice rules. Every
//! operation reads the files it needs, does its work and writes back whole
//! files; nothing is cached between calls.

pub mod appointments;
pub mod inactive;
pub mod patients;
pub mod prescriptions;

pub use appointments::BookingRequest;
pub use patients::PatientForm;
pub use prescriptions::PrescriptionRequest;

use crate::config::{ClinicRules, Settings};
use crate::data::{is_all_digits, Appointment, Patient, Prescription, RecordId};
use crate::store::Table;
use crate::validation;
use crate::{ClinicError, ClinicResult};
use chrono::{Local, NaiveDateTime};
use std::collections::HashSet;
use tracing::info;

/// What a patient delete removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub patients: usize,
    pub appointments: usize,
    pub prescriptions: usize,
}

impl std::fmt::Display for CascadeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} patient(s), {} appointment(s), {} prescription(s) deleted",
            self.patients, self.appointments, self.prescriptions
        )
    }
}

/// The practice's records
pub struct Clinic {
    patients: Table<Patient>,
    appointments: Table<Appointment>,
    prescriptions: Table<Prescription>,
    rules: ClinicRules,
    clock: Option<NaiveDateTime>,
}

impl Clinic {
    pub fn open(settings: &Settings) -> Self {
        Self {
            patients: Table::open(settings.patients_path()),
            appointments: Table::open(settings.appointments_path()),
            prescriptions: Table::open(settings.prescriptions_path()),
            rules: settings.clinic.clone(),
            clock: None,
        }
    }

    /// Pin "now" to a fixed instant
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.unwrap_or_else(|| Local::now().naive_local())
    }

    pub fn rules(&self) -> &ClinicRules {
        &self.rules
    }

    pub fn patients(&self) -> &Table<Patient> {
        &self.patients
    }

    pub fn appointments(&self) -> &Table<Appointment> {
        &self.appointments
    }

    pub fn prescriptions(&self) -> &Table<Prescription> {
        &self.prescriptions
    }

    /// Turn a typed identifier into a patient id.
    ///
    /// A string of digits is taken as the id itself, without looking at the
    /// patient file; one too large to be an id names nobody. Anything else
    /// is matched case-insensitively against first, last and full names and
    /// must hit exactly one patient.
    pub fn resolve_patient(&self, identifier: &str) -> ClinicResult<RecordId> {
        let identifier = validation::required(identifier, "Patient")?;
        if is_all_digits(identifier) {
            return RecordId::parse(identifier)
                .ok_or_else(|| ClinicError::PatientNotFound(identifier.to_string()));
        }
        match_patient(&self.patients.records()?, identifier)
    }

    /// Resolve and load the patient record
    pub(crate) fn resolve_patient_record(&self, identifier: &str) -> ClinicResult<Patient> {
        let id = self.resolve_patient(identifier)?;
        self.patients
            .get(id)?
            .ok_or_else(|| ClinicError::PatientNotFound(identifier.trim().to_string()))
    }

    /// Delete the given patients and everything that references them.
    ///
    /// Three whole-file rewrites in order: patients, appointments,
    /// prescriptions. A failure part way leaves the earlier files rewritten.
    pub(crate) fn remove_patients(&self, ids: &HashSet<RecordId>) -> ClinicResult<CascadeReport> {
        let patients = self.patients.retain(|p| !ids.contains(&p.id))?;
        if patients == 0 {
            return Ok(CascadeReport::default());
        }
        let appointments = self.appointments.retain(|a| !ids.contains(&a.patient_id))?;
        let prescriptions = self.prescriptions.retain(|p| !ids.contains(&p.patient_id))?;

        let report = CascadeReport {
            patients,
            appointments,
            prescriptions,
        };
        info!(%report, "patient records removed");
        Ok(report)
    }
}

/// Name lookup over already-loaded patients
pub fn match_patient(patients: &[Patient], query: &str) -> ClinicResult<RecordId> {
    let needle = query.trim().to_lowercase();
    let mut matches = patients.iter().filter(|p| p.name_matches(&needle));

    match (matches.next(), matches.next()) {
        (Some(patient), None) => Ok(patient.id),
        (Some(_), Some(_)) => Err(ClinicError::AmbiguousPatient(query.trim().to_string())),
        (None, _) => Err(ClinicError::PatientNotFound(query.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient(id: u64, first: &str, last: &str) -> Patient {
        Patient {
            id: RecordId(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            phone: "0123456789".to_string(),
            email: "x@example.com".to_string(),
            address: "somewhere".to_string(),
        }
    }

    #[test]
    fn name_lookup_outcomes() {
        let patients = vec![
            patient(1, "Jane", "Doe"),
            patient(2, "John", "Doe"),
            patient(3, "Alice", "Smith"),
        ];
        assert_eq!(match_patient(&patients, "alice").unwrap(), RecordId(3));
        assert_eq!(match_patient(&patients, "JANE DOE").unwrap(), RecordId(1));
        assert!(matches!(
            match_patient(&patients, "doe"),
            Err(ClinicError::AmbiguousPatient(_))
        ));
        assert!(matches!(
            match_patient(&patients, "bob"),
            Err(ClinicError::PatientNotFound(_))
        ));
    }

    #[test]
    fn digits_resolve_without_reading_the_patient_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::in_dir(dir.path());
        // Unreadable patient file: a directory where the file should be
        std::fs::create_dir_all(settings.patients_path()).unwrap();

        let clinic = Clinic::open(&settings);
        assert_eq!(clinic.resolve_patient(" 17 ").unwrap(), RecordId(17));
        assert!(matches!(
            clinic.resolve_patient("99999999999999999999"),
            Err(ClinicError::PatientNotFound(_))
        ));
        assert!(matches!(
            clinic.resolve_patient("Jane"),
            Err(ClinicError::Io { .. })
        ));
    }
}

//! Patient operations

use super::{CascadeReport, Clinic};
use crate::data::{Patient, RecordId, DATE_FORMAT};
use crate::validation::{self, ValidationError};
use crate::{ClinicError, ClinicResult};
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::info;

/// Patient details as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl PatientForm {
    /// Check every field and build the record. Emptiness is checked for all
    /// fields first, then date of birth, phone and email.
    pub fn into_patient(self, id: RecordId, now: NaiveDateTime) -> Result<Patient, ValidationError> {
        let first_name = validation::required(&self.first_name, "First Name")?;
        let last_name = validation::required(&self.last_name, "Last Name")?;
        let date_of_birth = validation::required(&self.date_of_birth, "Date of Birth")?;
        let phone = validation::required(&self.phone, "Phone")?;
        let email = validation::required(&self.email, "Email")?;
        let address = validation::required(&self.address, "Address")?;

        let date_of_birth = validation::past_date(date_of_birth, now)?;
        validation::phone(phone)?;
        validation::email(email)?;

        Ok(Patient {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth,
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        })
    }
}

impl From<&Patient> for PatientForm {
    fn from(patient: &Patient) -> Self {
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            date_of_birth: patient.date_of_birth.format(DATE_FORMAT).to_string(),
            phone: patient.phone.clone(),
            email: patient.email.clone(),
            address: patient.address.clone(),
        }
    }
}

impl Clinic {
    pub fn add_patient(&self, form: PatientForm) -> ClinicResult<Patient> {
        let id = self.patients.next_id()?;
        let patient = form.into_patient(id, self.now())?;
        self.patients.append(&patient)?;
        info!(id = %patient.id, "patient added");
        Ok(patient)
    }

    /// Patients whose "first last" contains the query, ignoring case
    pub fn search_patients(&self, query: &str) -> ClinicResult<Vec<Patient>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .patients
            .records()?
            .into_iter()
            .filter(|p| p.full_name().to_lowercase().contains(&needle))
            .collect())
    }

    pub fn find_patient(&self, identifier: &str) -> ClinicResult<Patient> {
        let id = self.resolve_patient(identifier)?;
        self.patients
            .get(id)?
            .ok_or_else(|| ClinicError::RecordNotFound {
                kind: "Patient",
                id: id.to_string(),
            })
    }

    /// Replace every field of an existing patient; the id stays
    pub fn update_patient(&self, identifier: &str, form: PatientForm) -> ClinicResult<Patient> {
        let id = self.resolve_patient(identifier)?;
        let updated = form.into_patient(id, self.now())?;

        let changed = self.patients.update(|patient| {
            if patient.id != id {
                return false;
            }
            *patient = updated.clone();
            true
        })?;
        if changed.is_empty() {
            return Err(ClinicError::RecordNotFound {
                kind: "Patient",
                id: id.to_string(),
            });
        }
        info!(%id, "patient updated");
        Ok(updated)
    }

    /// Delete a patient with all of their appointments and prescriptions
    pub fn delete_patient(&self, identifier: &str) -> ClinicResult<CascadeReport> {
        let id = self.resolve_patient(identifier)?;
        let report = self.remove_patients(&HashSet::from([id]))?;
        if report.patients == 0 {
            return Err(ClinicError::RecordNotFound {
                kind: "Patient",
                id: id.to_string(),
            });
        }
        Ok(report)
    }

    pub fn list_patients(&self) -> ClinicResult<Vec<Patient>> {
        self.patients.records()
    }
}

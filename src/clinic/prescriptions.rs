//! Prescription operations

use super::Clinic;
use crate::data::{Prescription, RecordId};
use crate::validation;
use crate::{ClinicError, ClinicResult};
use chrono::Duration;
use tracing::info;

/// A new prescription as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionRequest {
    pub patient: String,
    pub details: String,
    pub issued_on: String,
}

/// Which prescriptions an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Prescription(RecordId),
    Patient(RecordId),
}

impl Selection {
    fn includes(&self, prescription: &Prescription) -> bool {
        match *self {
            Selection::Prescription(id) => prescription.id == id,
            Selection::Patient(id) => prescription.patient_id == id,
        }
    }
}

impl Clinic {
    pub fn add_prescription(&self, request: PrescriptionRequest) -> ClinicResult<Prescription> {
        let patient = validation::required(&request.patient, "Patient Full Name")?;
        let details = validation::required(&request.details, "Details")?;
        let issued_on = validation::required(&request.issued_on, "Prescription Date")?;

        let issued_on = validation::date(issued_on)?;
        let expires_on = issued_on + Duration::days(self.rules.prescription_validity_days);
        let patient = self.resolve_patient_record(patient)?;

        let prescription = Prescription {
            id: self.prescriptions.next_id()?,
            patient_id: patient.id,
            patient_name: patient.full_name(),
            details: details.to_string(),
            issued_on,
            expires_on,
        };
        self.prescriptions.append(&prescription)?;
        info!(id = %prescription.id, patient = %patient.id, "prescription added");
        Ok(prescription)
    }

    /// A prescription id picks that prescription; anything else is taken
    /// as a patient and picks all of theirs.
    pub fn find_prescriptions(&self, identifier: &str) -> ClinicResult<Vec<Prescription>> {
        let selection = self.select(identifier)?;
        let found: Vec<Prescription> = self
            .prescriptions
            .records()?
            .into_iter()
            .filter(|p| selection.includes(p))
            .collect();
        if found.is_empty() {
            return Err(not_found(identifier));
        }
        Ok(found)
    }

    /// Replace the details text of the selected prescriptions
    pub fn update_prescription_details(
        &self,
        identifier: &str,
        details: &str,
    ) -> ClinicResult<Vec<Prescription>> {
        let details = validation::required(details, "Prescription Details")?;
        let selection = self.select(identifier)?;

        let changed = self.prescriptions.update(|p| {
            if !selection.includes(p) {
                return false;
            }
            p.details = details.to_string();
            true
        })?;
        if changed.is_empty() {
            return Err(not_found(identifier));
        }
        info!(count = changed.len(), "prescription details updated");
        Ok(changed)
    }

    /// Delete every prescription of a patient
    pub fn delete_prescriptions(&self, patient: &str) -> ClinicResult<usize> {
        let patient_id = self.resolve_patient(patient)?;
        let removed = self.prescriptions.retain(|p| p.patient_id != patient_id)?;
        if removed == 0 {
            return Err(not_found(patient));
        }
        info!(patient = %patient_id, removed, "prescriptions deleted");
        Ok(removed)
    }

    pub fn list_prescriptions(&self) -> ClinicResult<Vec<Prescription>> {
        self.prescriptions.records()
    }

    fn select(&self, identifier: &str) -> ClinicResult<Selection> {
        if let Some(id) = RecordId::parse(identifier) {
            if self.prescriptions.get(id)?.is_some() {
                return Ok(Selection::Prescription(id));
            }
        }
        self.resolve_patient(identifier).map(Selection::Patient)
    }
}

fn not_found(identifier: &str) -> ClinicError {
    ClinicError::RecordNotFound {
        kind: "Prescription",
        id: identifier.trim().to_string(),
    }
}

//! Appointment booking and slot conflicts

use super::Clinic;
use crate::data::{Appointment, RecordId, BOOKED, DATE_FORMAT, TIME_FORMAT};
use crate::validation;
use crate::{ClinicError, ClinicResult};
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

/// A booking as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRequest {
    pub patient: String,         // Name or id
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl Clinic {
    /// Fail with [`ClinicError::SlotTaken`] when another booked appointment
    /// holds the slot. `exclude` names an appointment being moved, which
    /// never conflicts with itself.
    pub fn ensure_slot_free(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        exclude: Option<RecordId>,
    ) -> ClinicResult<()> {
        let taken = self
            .appointments
            .records()?
            .iter()
            .any(|a| Some(a.id) != exclude && a.holds_slot(date, time));
        if taken {
            return Err(ClinicError::SlotTaken {
                date: date.format(DATE_FORMAT).to_string(),
                time: time.format(TIME_FORMAT).to_string(),
            });
        }
        Ok(())
    }

    pub fn book_appointment(&self, request: BookingRequest) -> ClinicResult<Appointment> {
        let patient = validation::required(&request.patient, "Patient Full Name")?;
        let date = validation::required(&request.date, "Date")?;
        let time = validation::required(&request.time, "Time")?;
        let reason = validation::required(&request.reason, "Reason")?;

        let date = validation::future_date(date, self.now())?;
        let time = validation::appointment_time(time, self.rules.service_window())?;

        self.ensure_slot_free(date, time, None)?;
        let patient = self.resolve_patient_record(patient)?;

        let appointment = Appointment {
            id: self.appointments.next_id()?,
            patient_id: patient.id,
            patient_name: patient.full_name(),
            date,
            time,
            status: BOOKED.to_string(),
            reason: reason.to_string(),
        };
        self.appointments.append(&appointment)?;
        info!(id = %appointment.id, patient = %patient.id, "appointment booked");
        Ok(appointment)
    }

    /// Delete a patient's appointments at the given date and time
    pub fn cancel_appointment(&self, patient: &str, date: &str, time: &str) -> ClinicResult<usize> {
        let patient_id = self.resolve_patient(patient)?;
        let date = validation::date(date)?;
        let time = validation::time(time)?;

        let removed = self
            .appointments
            .retain(|a| !(a.patient_id == patient_id && a.date == date && a.time == time))?;
        if removed == 0 {
            return Err(ClinicError::RecordNotFound {
                kind: "Appointment",
                id: format!(
                    "patient {} at {} {}",
                    patient_id,
                    date.format(DATE_FORMAT),
                    time.format(TIME_FORMAT)
                ),
            });
        }
        info!(patient = %patient_id, removed, "appointment deleted");
        Ok(removed)
    }

    /// Move an appointment to a new slot; it is booked again afterwards
    pub fn reschedule_appointment(
        &self,
        id: &str,
        new_date: &str,
        new_time: &str,
    ) -> ClinicResult<Appointment> {
        let new_date = validation::required(new_date, "New Date")?;
        let new_time = validation::required(new_time, "New Time")?;
        let new_date = validation::future_date(new_date, self.now())?;
        let new_time = validation::appointment_time(new_time, self.rules.service_window())?;

        let id = self.appointment(id)?.id;
        self.ensure_slot_free(new_date, new_time, Some(id))?;

        let mut changed = self.appointments.update(|a| {
            if a.id != id {
                return false;
            }
            a.date = new_date;
            a.time = new_time;
            a.status = BOOKED.to_string();
            true
        })?;
        let appointment = changed.pop().ok_or_else(|| ClinicError::RecordNotFound {
            kind: "Appointment",
            id: id.to_string(),
        })?;
        info!(%id, "appointment rescheduled");
        Ok(appointment)
    }

    /// Set the free-text status; anything but "Booked" frees the slot, and
    /// going back to "Booked" needs the slot to still be free.
    pub fn set_appointment_status(&self, id: &str, status: &str) -> ClinicResult<Appointment> {
        let status = validation::required(status, "Status")?;
        let current = self.appointment(id)?;
        let id = current.id;
        if status.eq_ignore_ascii_case(BOOKED) {
            self.ensure_slot_free(current.date, current.time, Some(id))?;
        }

        let mut changed = self.appointments.update(|a| {
            if a.id != id {
                return false;
            }
            a.status = status.to_string();
            true
        })?;
        changed.pop().ok_or_else(|| ClinicError::RecordNotFound {
            kind: "Appointment",
            id: id.to_string(),
        })
    }

    pub fn list_appointments(&self) -> ClinicResult<Vec<Appointment>> {
        self.appointments.records()
    }

    fn appointment(&self, text: &str) -> ClinicResult<Appointment> {
        let not_found = || ClinicError::RecordNotFound {
            kind: "Appointment",
            id: text.trim().to_string(),
        };
        let id = RecordId::parse(text).ok_or_else(not_found)?;
        self.appointments.get(id)?.ok_or_else(not_found)
    }
}

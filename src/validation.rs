//! Field checks for user-entered values
//!
//! Each check either returns the parsed value or a [`ValidationError`] naming
//! what was wrong. No check has side effects.

use crate::data::DATE_FORMAT;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty.")]
    Empty(&'static str),

    #[error("Invalid date format '{0}'. Use DD/MM/YYYY.")]
    DateFormat(String),

    #[error("Date must be in the future.")]
    NotFuture,

    #[error("Date must be in the past.")]
    NotPast,

    #[error("Phone must be exactly 10 digits.")]
    Phone,

    #[error("Invalid email address.")]
    Email,

    #[error("Invalid time format '{0}'. Use HH:MM.")]
    TimeFormat(String),

    #[error("Time must be between {open:02}:00 and {close:02}:00.")]
    OutsideHours { open: u32, close: u32 },

    #[error("Minutes must be between 0 and 59.")]
    Minutes,
}

/// Opening hours for appointments: `open <= hour < close`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub open: u32,
    pub close: u32,
}

impl Default for ServiceWindow {
    fn default() -> Self {
        Self { open: 9, close: 19 }
    }
}

/// Trimmed value, or an error naming the empty field
pub fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(value)
}

pub fn date(text: &str) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::DateFormat(text.to_string()))
}

/// A date strictly after today
pub fn future_date(text: &str, now: NaiveDateTime) -> Result<NaiveDate, ValidationError> {
    let parsed = date(text)?;
    if parsed <= now.date() {
        return Err(ValidationError::NotFuture);
    }
    Ok(parsed)
}

/// A date no later than today (midnight today is already past)
pub fn past_date(text: &str, now: NaiveDateTime) -> Result<NaiveDate, ValidationError> {
    let parsed = date(text)?;
    if parsed > now.date() {
        return Err(ValidationError::NotPast);
    }
    Ok(parsed)
}

pub fn phone(text: &str) -> Result<(), ValidationError> {
    let text = text.trim();
    if text.len() != 10 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Phone);
    }
    Ok(())
}

/// Needs an `@` and a `.` somewhere after it
pub fn email(text: &str) -> Result<(), ValidationError> {
    match text.trim().split('@').nth(1) {
        Some(domain) if domain.contains('.') => Ok(()),
        _ => Err(ValidationError::Email),
    }
}

/// `HH:MM` inside the service window
pub fn appointment_time(text: &str, window: ServiceWindow) -> Result<NaiveTime, ValidationError> {
    let text = text.trim();
    let format_error = || ValidationError::TimeFormat(text.to_string());

    let (hour, minute) = text.split_once(':').ok_or_else(format_error)?;
    let hour: u32 = hour.trim().parse().map_err(|_| format_error())?;
    let minute: u32 = minute.trim().parse().map_err(|_| format_error())?;

    if hour < window.open || hour >= window.close {
        return Err(ValidationError::OutsideHours {
            open: window.open,
            close: window.close,
        });
    }
    if minute > 59 {
        return Err(ValidationError::Minutes);
    }
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(format_error)
}

/// `HH:MM` with no opening-hours check, for locating existing slots
pub fn time(text: &str) -> Result<NaiveTime, ValidationError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, crate::data::TIME_FORMAT)
        .map_err(|_| ValidationError::TimeFormat(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn required_trims_and_names_the_field() {
        assert_eq!(required("  Jane ", "First Name"), Ok("Jane"));
        assert_eq!(
            required("   ", "First Name"),
            Err(ValidationError::Empty("First Name"))
        );
    }

    #[test]
    fn future_and_past_dates() {
        let now = noon(2025, 1, 15);
        assert!(future_date("16/01/2025", now).is_ok());
        assert_eq!(future_date("15/01/2025", now), Err(ValidationError::NotFuture));
        assert!(past_date("15/01/2025", now).is_ok());
        assert_eq!(past_date("16/01/2025", now), Err(ValidationError::NotPast));
        assert!(matches!(
            past_date("1985-03-02", now),
            Err(ValidationError::DateFormat(_))
        ));
    }

    #[test]
    fn phone_needs_ten_digits() {
        assert!(phone("0123456789").is_ok());
        assert_eq!(phone("012345678"), Err(ValidationError::Phone));
        assert_eq!(phone("01234567ab"), Err(ValidationError::Phone));
    }

    #[test]
    fn email_shape() {
        assert!(email("jane@example.com").is_ok());
        assert_eq!(email("jane.example.com"), Err(ValidationError::Email));
        assert_eq!(email("jane@localhost"), Err(ValidationError::Email));
    }

    #[test]
    fn appointment_times_respect_the_window() {
        let window = ServiceWindow::default();
        assert_eq!(
            appointment_time("09:00", window),
            Ok(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        );
        assert!(appointment_time("18:59", window).is_ok());
        assert_eq!(
            appointment_time("19:00", window),
            Err(ValidationError::OutsideHours { open: 9, close: 19 })
        );
        assert_eq!(
            appointment_time("08:30", window),
            Err(ValidationError::OutsideHours { open: 9, close: 19 })
        );
        assert_eq!(appointment_time("10:75", window), Err(ValidationError::Minutes));
        assert!(matches!(
            appointment_time("ten", window),
            Err(ValidationError::TimeFormat(_))
        ));
    }
}

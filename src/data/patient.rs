//! Patient records

use super::{day_month_year, Record, RecordId, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "day_month_year")]
    pub date_of_birth: NaiveDate,
    pub phone: String,           // 10 digits
    pub email: String,
    pub address: String,
}

impl Patient {
    /// "First Last", as copied onto appointments and prescriptions
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on first, last or full name.
    /// `needle` must already be lowercase.
    pub fn name_matches(&self, needle: &str) -> bool {
        let first = self.first_name.to_lowercase();
        let last = self.last_name.to_lowercase();
        first.contains(needle)
            || last.contains(needle)
            || format!("{first} {last}").contains(needle)
    }
}

impl Record for Patient {
    const KIND: &'static str = "Patient";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {}",
            self.id,
            self.full_name(),
            self.date_of_birth.format(DATE_FORMAT),
            self.phone,
            self.email,
            self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Patient {
        Patient {
            id: RecordId(3),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 2, 1).unwrap(),
            phone: "0123456789".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 High Street, Leeds".to_string(),
        }
    }

    #[test]
    fn name_matching_covers_first_last_and_full() {
        let p = jane();
        assert!(p.name_matches("jan"));
        assert!(p.name_matches("doe"));
        assert!(p.name_matches("jane d"));
        assert!(!p.name_matches("john"));
    }

    #[test]
    fn stored_form_keeps_dates_and_commas() {
        let line = serde_json::to_string(&jane()).unwrap();
        assert!(line.contains("\"date_of_birth\":\"01/02/1980\""));
        let back: Patient = serde_json::from_str(&line).unwrap();
        assert_eq!(back.address, "1 High Street, Leeds");
    }
}

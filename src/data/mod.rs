//! Record types for the clinic and the adventure
//!
//! Defines patients, appointments, prescriptions and adventure progress.

pub mod appointment;
pub mod patient;
pub mod prescription;
pub mod progress;

pub use appointment::*;
pub use patient::*;
pub use prescription::*;
pub use progress::*;

use serde::{Deserialize, Serialize};

/// Date format used for every stored and entered date
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format used for appointment slots
pub const TIME_FORMAT: &str = "%H:%M";

/// Sequential record identifier, stored as a string of digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(pub u64);

impl RecordId {
    /// Id handed out when a collection is empty
    pub const FIRST: RecordId = RecordId(1);

    /// `None` once the id space is used up
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse an identifier made only of ASCII digits. Digit strings too
    /// large for a `u64` are `None` as well.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !is_all_digits(text) {
            return None;
        }
        text.parse().ok().map(Self)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecordId::parse(&value).ok_or_else(|| format!("invalid record id: {value:?}"))
    }
}

/// Non-empty and made only of ASCII digits
pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Records that carry a sequential id
pub trait Record {
    /// Human name of the collection, used in error messages
    const KIND: &'static str;

    fn id(&self) -> RecordId;
}

/// Serde adapter for `DD/MM/YYYY` dates
pub(crate) mod day_month_year {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times
pub(crate) mod hour_minute {
    use super::TIME_FORMAT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

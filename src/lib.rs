//! Optician: record keeping for a small optician's office
//!
//! Patients, appointments and prescriptions live in three flat record files
//! (one JSON document per line). A second, unrelated toy rides along: a short
//! text adventure that saves its progress after every room.
//!
//! # Architecture
//!
//! - `data` - Record types (patient, appointment, prescription, adventure progress)
//! - `store` - Flat record files and sequential id assignment
//! - `clinic` - Record operations: resolution, booking, cascades, inactivity
//! - `validation` - Field checks for user-entered values
//! - `game` - The adventure's room state machine and save file
//! - `config` / `logging` - Settings layering and the tracing subscriber

pub mod clinic;
pub mod config;
pub mod data;
pub mod game;
pub mod logging;
pub mod store;
pub mod validation;

pub use clinic::Clinic;
pub use data::*;
pub use game::Adventure;

use std::path::PathBuf;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the command line front end
pub type Result<T> = anyhow::Result<T>;

/// Result type for clinic operations
pub type ClinicResult<T> = std::result::Result<T, ClinicError>;

/// Failures of clinic record operations
#[derive(thiserror::Error, Debug)]
pub enum ClinicError {
    #[error(transparent)]
    Validation(#[from] validation::ValidationError),

    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Multiple patients match '{0}'. Please specify by ID.")]
    AmbiguousPatient(String),

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("The slot {date} {time} is already booked")]
    SlotTaken { date: String, time: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {0} id left to assign")]
    IdsExhausted(&'static str),

    #[error("Could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures of the adventure loop
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Save file corrupted: {0}")]
    CorruptedSave(String),

    #[error("Input closed before the room was finished")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

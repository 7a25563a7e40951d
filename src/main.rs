//! Optician
//!
//! Command line front end for the practice records, plus the adventure.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use optician::clinic::{BookingRequest, PatientForm, PrescriptionRequest};
use optician::config::{self, Settings};
use optician::game::{self, Outcome, StdConsole};
use optician::{logging, Adventure, Clinic};
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "optician", version, about = "Optician patient records (and a small text adventure)")]
struct Cli {
    /// Settings file (TOML); defaults to ./optician.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add, find, edit and delete patients
    #[command(subcommand)]
    Patient(PatientCommand),
    /// Book, move and cancel appointments
    #[command(subcommand)]
    Appointment(AppointmentCommand),
    /// Record and edit prescriptions
    #[command(subcommand)]
    Prescription(PrescriptionCommand),
    /// Patients without a recent prescription
    #[command(subcommand)]
    Inactive(InactiveCommand),
    /// Play the text adventure
    Adventure {
        /// Discard the saved game and start over
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum PatientCommand {
    Add(PatientFields),
    /// Search by (part of) the full name
    Search { query: String },
    /// Show one patient by id or name
    Show { identifier: String },
    /// Change some fields; the rest keep their current values
    Edit {
        identifier: String,
        #[command(flatten)]
        changes: PatientChanges,
    },
    /// Delete a patient and all of their appointments and prescriptions
    Delete { identifier: String },
    List,
}

#[derive(Args)]
struct PatientFields {
    #[arg(long)]
    first: String,
    #[arg(long)]
    last: String,
    /// Date of birth, DD/MM/YYYY
    #[arg(long)]
    dob: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    address: String,
}

#[derive(Args)]
struct PatientChanges {
    #[arg(long)]
    first: Option<String>,
    #[arg(long)]
    last: Option<String>,
    #[arg(long)]
    dob: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

impl PatientChanges {
    fn apply(self, form: &mut PatientForm) {
        let fields = [
            (self.first, &mut form.first_name),
            (self.last, &mut form.last_name),
            (self.dob, &mut form.date_of_birth),
            (self.phone, &mut form.phone),
            (self.email, &mut form.email),
            (self.address, &mut form.address),
        ];
        for (change, field) in fields {
            if let Some(value) = change {
                *field = value;
            }
        }
    }
}

#[derive(Subcommand)]
enum AppointmentCommand {
    Book {
        /// Patient name or id
        #[arg(long)]
        patient: String,
        /// DD/MM/YYYY
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        reason: String,
    },
    /// Move an appointment to a new slot
    Reschedule {
        id: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Delete a patient's appointment at a date and time
    Cancel {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Change the status text (anything but "Booked" frees the slot)
    Status { id: String, status: String },
    List,
}

#[derive(Subcommand)]
enum PrescriptionCommand {
    Add {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        details: String,
        /// Issue date, DD/MM/YYYY
        #[arg(long)]
        date: String,
    },
    /// Show by prescription id, or all of a patient's
    Show { identifier: String },
    /// Replace the details text
    Edit {
        identifier: String,
        #[arg(long)]
        details: String,
    },
    /// Delete all prescriptions of a patient
    Delete { patient: String },
    List,
}

#[derive(Subcommand)]
enum InactiveCommand {
    List,
    /// Delete every inactive patient and their records
    Purge {
        /// Actually delete; without it the candidates are only listed
        #[arg(long)]
        yes: bool,
    },
}

fn print_all<T: Display>(records: &[T], empty: &str) {
    if records.is_empty() {
        println!("{empty}");
    }
    for record in records {
        println!("{record}");
    }
}

fn run_patient(clinic: &Clinic, command: PatientCommand) -> optician::Result<()> {
    match command {
        PatientCommand::Add(fields) => {
            let patient = clinic.add_patient(PatientForm {
                first_name: fields.first,
                last_name: fields.last,
                date_of_birth: fields.dob,
                phone: fields.phone,
                email: fields.email,
                address: fields.address,
            })?;
            println!("Patient added with ID {}.", patient.id);
        }
        PatientCommand::Search { query } => {
            print_all(&clinic.search_patients(&query)?, "No matching patient found.");
        }
        PatientCommand::Show { identifier } => println!("{}", clinic.find_patient(&identifier)?),
        PatientCommand::Edit { identifier, changes } => {
            let current = clinic.find_patient(&identifier)?;
            let mut form = PatientForm::from(&current);
            changes.apply(&mut form);
            let updated = clinic.update_patient(&current.id.to_string(), form)?;
            println!("Patient record updated: {updated}");
        }
        PatientCommand::Delete { identifier } => {
            let report = clinic.delete_patient(&identifier)?;
            println!("{report}");
        }
        PatientCommand::List => print_all(&clinic.list_patients()?, "No patient records."),
    }
    Ok(())
}

fn run_appointment(clinic: &Clinic, command: AppointmentCommand) -> optician::Result<()> {
    match command {
        AppointmentCommand::Book {
            patient,
            date,
            time,
            reason,
        } => {
            let appointment = clinic.book_appointment(BookingRequest {
                patient,
                date,
                time,
                reason,
            })?;
            println!("Appointment booked with ID {}.", appointment.id);
        }
        AppointmentCommand::Reschedule { id, date, time } => {
            let appointment = clinic.reschedule_appointment(&id, &date, &time)?;
            println!("Appointment moved: {appointment}");
        }
        AppointmentCommand::Cancel {
            patient,
            date,
            time,
        } => {
            let removed = clinic.cancel_appointment(&patient, &date, &time)?;
            println!("{removed} appointment(s) deleted.");
        }
        AppointmentCommand::Status { id, status } => {
            println!("{}", clinic.set_appointment_status(&id, &status)?);
        }
        AppointmentCommand::List => print_all(&clinic.list_appointments()?, "No appointments found."),
    }
    Ok(())
}

fn run_prescription(clinic: &Clinic, command: PrescriptionCommand) -> optician::Result<()> {
    match command {
        PrescriptionCommand::Add {
            patient,
            details,
            date,
        } => {
            let prescription = clinic.add_prescription(PrescriptionRequest {
                patient,
                details,
                issued_on: date,
            })?;
            println!("Prescription added with ID {}.", prescription.id);
        }
        PrescriptionCommand::Show { identifier } => {
            print_all(&clinic.find_prescriptions(&identifier)?, "No prescriptions found.");
        }
        PrescriptionCommand::Edit { identifier, details } => {
            let changed = clinic.update_prescription_details(&identifier, &details)?;
            println!("{} prescription(s) updated.", changed.len());
        }
        PrescriptionCommand::Delete { patient } => {
            let removed = clinic.delete_prescriptions(&patient)?;
            println!("{removed} prescription(s) deleted.");
        }
        PrescriptionCommand::List => print_all(&clinic.list_prescriptions()?, "No prescriptions found."),
    }
    Ok(())
}

fn run_inactive(clinic: &Clinic, command: InactiveCommand) -> optician::Result<()> {
    match command {
        InactiveCommand::List => print_all(&clinic.inactive_patients()?, "No inactive patients found."),
        InactiveCommand::Purge { yes: false } => {
            print_all(&clinic.inactive_patients()?, "No inactive patients found.");
            println!("Re-run with --yes to delete these patients and their records.");
        }
        InactiveCommand::Purge { yes: true } => {
            println!("{}", clinic.purge_inactive_patients()?);
        }
    }
    Ok(())
}

fn run_adventure(settings: &Settings, reset: bool) -> optician::Result<()> {
    let save_path = settings.save_path();
    if reset {
        game::reset_progress(&save_path)?;
    }
    let mut adventure = Adventure::new(StdConsole::new(), rand::thread_rng(), save_path);
    if let Outcome::Suspended(_) = adventure.play()? {
        println!("Progress saved to {}.", adventure.save_path().display());
    }
    Ok(())
}

fn main() -> optician::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(&settings.error_log_path()).context("Failed to initialise logging")?;

    let clinic = Clinic::open(&settings);
    match cli.command {
        Command::Patient(command) => run_patient(&clinic, command),
        Command::Appointment(command) => run_appointment(&clinic, command),
        Command::Prescription(command) => run_prescription(&clinic, command),
        Command::Inactive(command) => run_inactive(&clinic, command),
        Command::Adventure { reset } => run_adventure(&settings, reset),
    }
}

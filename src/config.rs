//! Application configuration
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! `OPTICIAN_*` environment variables (`OPTICIAN_DATA_DIR`,
//! `OPTICIAN_CLINIC__INACTIVE_AFTER_YEARS`, ...). Relative file names are
//! resolved against `data_dir`.

use crate::validation::ServiceWindow;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up when none is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = "optician.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub patients_file: PathBuf,
    pub appointments_file: PathBuf,
    pub prescriptions_file: PathBuf,
    pub error_log: PathBuf,
    pub save_file: PathBuf,
    pub clinic: ClinicRules,
}

/// Business rules of the practice
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClinicRules {
    pub inactive_after_years: i64,       // Counted as 365-day years
    pub prescription_validity_days: i64,
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            patients_file: PathBuf::from("patients.jsonl"),
            appointments_file: PathBuf::from("appointments.jsonl"),
            prescriptions_file: PathBuf::from("prescriptions.jsonl"),
            error_log: PathBuf::from("error_log.txt"),
            save_file: PathBuf::from("progress.json"),
            clinic: ClinicRules::default(),
        }
    }
}

impl Default for ClinicRules {
    fn default() -> Self {
        Self {
            inactive_after_years: 4,
            prescription_validity_days: 365,
            opening_hour: 9,
            closing_hour: 19,
        }
    }
}

impl ClinicRules {
    pub fn service_window(&self) -> ServiceWindow {
        ServiceWindow {
            open: self.opening_hour,
            close: self.closing_hour,
        }
    }
}

impl Settings {
    /// Settings rooted at `data_dir` with every other value defaulted
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn patients_path(&self) -> PathBuf {
        self.resolve(&self.patients_file)
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.resolve(&self.appointments_file)
    }

    pub fn prescriptions_path(&self) -> PathBuf {
        self.resolve(&self.prescriptions_file)
    }

    pub fn error_log_path(&self) -> PathBuf {
        self.resolve(&self.error_log)
    }

    pub fn save_path(&self) -> PathBuf {
        self.resolve(&self.save_file)
    }

    // Absolute paths replace data_dir entirely
    fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }
}

/// Load configuration from an optional file and the environment
pub fn load_config(file: Option<&Path>) -> Result<Settings, config::ConfigError> {
    let source = match file {
        Some(path) => config::File::from(path.to_path_buf()).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    config::Config::builder()
        .add_source(source)
        .add_source(
            config::Environment::with_prefix("OPTICIAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

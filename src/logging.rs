//! Tracing subscriber setup
//!
//! Two outputs: human-readable events on stderr filtered by `RUST_LOG`
//! (default `warn`), and an append-only error log that receives every
//! `WARN` and `ERROR` event with its timestamp.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub fn init(error_log: &Path) -> crate::Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    tracing_subscriber::registry()
        .with(console)
        .with(error_log_layer(error_log)?)
        .try_init()?;
    Ok(())
}

/// Layer appending `WARN` and above to the error log, creating it if needed
pub fn error_log_layer<S>(error_log: &Path) -> crate::Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(dir) = error_log.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log)?;

    Ok(fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::WARN))
}

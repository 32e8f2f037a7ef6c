//! tracing setup
//!
//! The TUI owns stdout/stderr, so formatted events only go to `--log-file`.
//! Without one no subscriber is installed and events are dropped.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Cli;
use crate::error::{KeyviewError, Result};

pub fn init(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("keyview={}", log_level).into());

    let file = open_log_file(path)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    tracing::debug!("Logging to {}", path.display());
    Ok(())
}

/// Open `path` for appending, creating it if needed
fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| KeyviewError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

//! Structured logging setup for the roster binaries.
//!
//! Initialize once at startup:
//!
//! ```ignore
//! use roster_core::logging::{LogConfig, init_logging};
//!
//! init_logging(&LogConfig::default())?;
//! ```
//!
//! `RUST_LOG` overrides the configured level, e.g.
//! `RUST_LOG=roster_core=debug`.

use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level filter (trace, debug, info, warn, error).
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Errors from [`init_logging`].
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A global subscriber was already installed by this module.
    #[error("logging already initialized")]
    AlreadyInitialized,

    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    FileOpen(#[from] io::Error),

    /// Another global subscriber is already installed.
    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global `tracing` subscriber.
///
/// Writes to `config.file` when set, otherwise to stderr.
pub fn init_logging(config: &LogConfig) -> Result<(), LogError> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_target(true)
                    .with_ansi(false),
            );
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_ansi(true),
            );
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let _ = LOGGING_INITIALIZED.set(());
    tracing::debug!(level = %config.level, file = ?config.file, "logging initialized");
    Ok(())
}

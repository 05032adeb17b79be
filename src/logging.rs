//! Logging setup for the binary.
//!
//! Log records go to stderr so that stdout carries only command output
//! (plain text or JSON).

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, VERBOSE_LOG_LEVEL};
use crate::errors::{AppError, AppResult};
use std::fmt;
use std::io;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format for log records.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per record, including the active spans
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str(LOG_FORMAT_TEXT),
            LogFormat::Json => f.write_str(LOG_FORMAT_JSON),
        }
    }
}

/// Builds the level filter: `debug` when verbose, otherwise `RUST_LOG` or `info`.
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns `AppError::Config` if a global subscriber is already installed.
pub fn init_logging(format: LogFormat, verbose: bool) -> AppResult<()> {
    let registry = tracing_subscriber::registry().with(build_filter(verbose));

    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

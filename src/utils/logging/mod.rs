//! Logging setup
//!
//! Installs the global `tracing` subscriber. Filtering follows `RUST_LOG`
//! and falls back to the level given on the command line.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one event per line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(GatewayError::config(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

/// Build the filter from `RUST_LOG`, or `default_directive` when unset
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber
///
/// Fails if a subscriber is already installed (e.g. called twice).
pub fn init(format: LogFormat, default_directive: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .with_thread_ids(false);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| GatewayError::internal(format!("Failed to install logger: {}", e)))
}

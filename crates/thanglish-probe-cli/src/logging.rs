//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only reports and command output.
//! `RUST_LOG` overrides the level picked from `-q`/`-v`.

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Filter directives for `verbosity` when `RUST_LOG` is unset
///
/// chromiumoxide reports unhandled CDP events at warn level; those stay
/// hidden unless debugging.
#[must_use]
pub fn default_directives(verbosity: Verbosity) -> String {
    match verbosity {
        Verbosity::Debug => verbosity.log_level().to_string(),
        _ => format!("{},chromiumoxide=error", verbosity.log_level()),
    }
}

/// Install the global subscriber
pub fn init(verbosity: Verbosity, format: LogFormat) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::config(format!("cannot install logger: {e}")))
}

//! Error types for the CLI

use std::process::ExitCode;
use thanglish_probe::ProbeError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The suite ran but not every scenario passed
    #[error("{failed} of {total} scenarios did not pass")]
    ScenariosFailed {
        /// Failed, errored or skipped scenarios
        failed: usize,
        /// Scenarios in the suite
        total: usize,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Probe library error
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether the error is a verdict rather than a setup problem
    #[must_use]
    pub const fn is_test_failure(&self) -> bool {
        matches!(self, Self::ScenariosFailed { .. })
    }

    /// Exit status: 1 for failing scenarios, 2 for everything else
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        if self.is_test_failure() {
            1
        } else {
            2
        }
    }

    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

//! Thanglish Probe CLI: command-line runner for the transliteration probe
//!
//! ## Usage
//!
//! ```bash
//! thanglish-probe run                        # Run the built-in catalog
//! thanglish-probe run --filter neg -j 4      # Negative scenarios, four at a time
//! thanglish-probe run --format json -o r.json
//! thanglish-probe list --format yaml > suite.yaml
//! thanglish-probe translate "kaalai vanakkam"
//! thanglish-probe classify "வணக்கம்"
//! ```
//!
//! Exit codes: 0 when every scenario passed, 1 when any did not, 2 when the
//! run could not be set up.

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    ClassifyArgs, Cli, ColorArg, Commands, ConfigArgs, ListArgs, ListFormatArg, LogFormatArg,
    ReportFormatArg, RunArgs, SettleArg, TargetArgs, TranslateArgs,
};
pub use config::{load_probe_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::LogFormat;
pub use output::ProgressReporter;

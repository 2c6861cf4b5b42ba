//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thanglish_probe::{ProbeConfig, ReportFormat, Settle, CHAINED_SETTLE_MS, DEFAULT_SETTLE_MS};

/// End-to-end probe for a Thanglish to Tamil transliteration site
#[derive(Parser, Debug)]
#[command(name = "thanglish-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Probe configuration file (YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scenario suite against the site
    Run(RunArgs),

    /// List scenarios without running them
    List(ListArgs),

    /// Transliterate one input on the live site
    Translate(TranslateArgs),

    /// Report whether a string contains Tamil script (offline)
    Classify(ClassifyArgs),

    /// Print the effective configuration as YAML
    Config(ConfigArgs),
}

/// Options that shape the browser and target page
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Page under test
    #[arg(long, env = "THANGLISH_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Chromium binary to launch
    #[arg(long, env = "CHROMIUM_PATH", value_name = "PATH")]
    pub chromium: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chromium sandbox (containers/CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Settle strategy after each commit
    #[arg(long, value_name = "STRATEGY")]
    pub settle: Option<SettleArg>,
}

impl TargetArgs {
    /// Layer these flags over `config`; unset flags leave it untouched
    pub fn apply(&self, config: &mut ProbeConfig) {
        if let Some(url) = &self.url {
            config.target_url.clone_from(url);
        }
        if let Some(path) = &self.chromium {
            config.browser.chromium_path = Some(path.clone());
        }
        if self.headed {
            config.browser.headless = false;
        }
        if self.no_sandbox {
            config.browser.sandbox = false;
        }
        if let Some(settle) = self.settle {
            config.settle = settle.into();
            config.chained_settle = settle.chained();
        }
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Only run scenarios whose id or title contains PATTERN
    #[arg(short, long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Scenario suite file (YAML) instead of the built-in catalog
    #[arg(short, long, value_name = "FILE")]
    pub suite: Option<PathBuf>,

    /// Scenarios in flight at once
    #[arg(short = 'j', long, default_value = "1")]
    pub jobs: usize,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Report format
    #[arg(long, default_value = "text")]
    pub format: ReportFormatArg,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Browser and target options
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Only list scenarios whose id or title contains PATTERN
    #[arg(short, long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Scenario suite file (YAML) instead of the built-in catalog
    #[arg(short, long, value_name = "FILE")]
    pub suite: Option<PathBuf>,

    /// Listing format
    #[arg(long, default_value = "text")]
    pub format: ListFormatArg,
}

/// Arguments for the translate command
#[derive(Args, Debug, Clone)]
pub struct TranslateArgs {
    /// Thanglish text to commit
    pub text: String,

    /// Browser and target options
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the classify command
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Text to classify
    pub text: String,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Browser and target options
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Color choice argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for crate::logging::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Report format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Plain text
    #[default]
    Text,
    /// Pretty JSON
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Text => Self::Text,
            ReportFormatArg::Json => Self::Json,
        }
    }
}

/// Listing format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFormatArg {
    /// One line per scenario
    #[default]
    Text,
    /// The suite as YAML, loadable with --suite
    Yaml,
}

/// Settle strategy argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleArg {
    /// Fixed pause after each commit
    Fixed,
    /// Poll until the output stops changing
    Stable,
}

impl SettleArg {
    /// Strategy for commits chained on one page
    #[must_use]
    pub const fn chained(self) -> Settle {
        match self {
            Self::Fixed => Settle::fixed(CHAINED_SETTLE_MS),
            Self::Stable => Settle::stable(CHAINED_SETTLE_MS / 2),
        }
    }
}

impl From<SettleArg> for Settle {
    fn from(arg: SettleArg) -> Self {
        match arg {
            SettleArg::Fixed => Self::fixed(DEFAULT_SETTLE_MS),
            SettleArg::Stable => Self::stable(DEFAULT_SETTLE_MS / 2),
        }
    }
}

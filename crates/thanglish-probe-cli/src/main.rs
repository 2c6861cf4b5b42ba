//! Thanglish Probe CLI entry point

use clap::Parser;
use std::process::ExitCode;
use thanglish_probe_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands, Verbosity};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(config.verbosity, config.log_format)?;

    match cli.command {
        Commands::Run(args) => handlers::run_suite(&config, &args),
        Commands::List(args) => handlers::run_list(&args),
        Commands::Translate(args) => handlers::run_translate(&config, &args),
        Commands::Classify(args) => {
            handlers::run_classify(&args);
            Ok(())
        }
        Commands::Config(args) => handlers::run_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_log_format(cli.log_format.into())
        .with_config_path(cli.config.clone())
}

//! detox CLI entry point
//!
//! Usage:
//!   detox build [-c <configuration>]   Run a configuration's build script
//!   detox run-server [-p <port>]       Start a standalone Detox server

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use detox_cli::cli::{run_build_command, run_server_command, Cli, Commands};
use detox_cli::error::DetoxError;
use detox_cli::logging;
use detox_cli::settings::{find_settings_files, load_settings};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);

            let detox_error = e.downcast_ref::<DetoxError>();
            if let Some(hint) = detox_error.and_then(DetoxError::suggestion) {
                eprintln!("{}: {}", "hint".yellow(), hint);
            }

            ExitCode::from(detox_error.map(DetoxError::exit_code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.settings.as_deref())?;

    if cli.verbose {
        for path in find_settings_files() {
            tracing::debug!("Settings file: {}", path.display());
        }
    }

    match cli.command {
        Commands::Build(args) => {
            let build = run_build_command(&args, cli.manifest.as_deref(), &settings.build)?;
            if cli.verbose {
                eprintln!(
                    "{}: build for '{}' completed",
                    "success".green(),
                    build.name
                );
            }
        }
        Commands::RunServer(args) => {
            run_server_command(&args, &settings.server).await?;
        }
    }

    Ok(())
}

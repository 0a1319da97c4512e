//! CLI command definitions using clap
//!
//! Defines the `build` and `run-server` subcommands and their arguments.

use clap::{Parser, Subcommand};

use crate::logging::LogFormat;
use crate::server::is_integer;

/// Detox command-line front-end.
///
/// Builds the app under test from a configuration in package.json, or
/// starts a standalone Detox server.
#[derive(Parser, Debug)]
#[command(name = "detox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project manifest (defaults to ./package.json)
    #[arg(long, global = true, env = "DETOX_MANIFEST")]
    pub manifest: Option<String>,

    /// Settings file path (overrides default XDG paths)
    #[arg(long, global = true)]
    pub settings: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// [convenience method] Run the command defined in 'configuration.build'
    Build(BuildArgs),

    /// Start a standalone Detox server
    RunServer(RunServerArgs),
}

/// Arguments for the `build` subcommand
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Configuration from detox.configurations to build (optional when
    /// there is only one)
    #[arg(short = 'c', long = "config", visible_alias = "configuration")]
    pub configuration: Option<String>,
}

/// Arguments for the `run-server` subcommand
#[derive(Parser, Debug)]
pub struct RunServerArgs {
    /// Port to listen on [default: 8099]
    #[arg(short, long, allow_negative_numbers = true, value_parser = parse_port)]
    pub port: Option<String>,
}

/// Accept any integer text; the range check happens at launch
fn parse_port(s: &str) -> Result<String, String> {
    if is_integer(s) {
        Ok(s.to_string())
    } else {
        Err(format!("invalid port: expected an integer, got '{}'", s))
    }
}

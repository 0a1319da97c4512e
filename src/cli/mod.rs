//! CLI module for detox-cli
//!
//! Provides the command-line interface and the handlers behind each
//! subcommand.

pub mod build;
pub mod commands;
pub mod run_server;

pub use build::{manifest_path, run_build_command};
pub use commands::{Cli, Commands};
pub use run_server::run_server_command;

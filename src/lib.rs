//! detox-cli - command-line front-end for Detox
//!
//! Two commands:
//! - **build** - run the `build` script of a configuration from the
//!   `detox.configurations` section of `package.json`
//! - **run-server** - start a standalone Detox server on a given port
//!
//! ## Features
//!
//! - Implicit configuration selection when the manifest defines only one
//! - Build scripts run through a shell with inherited stdio
//! - Server abstracted behind [`server::CoordinationServer`]
//! - XDG-compliant layered settings with `DETOX_CLI_*` overrides

pub mod cli;
pub mod error;
pub mod executor;
pub mod logging;
pub mod manifest;
pub mod server;
pub mod settings;

pub use cli::{Cli, Commands};
pub use error::DetoxError;
pub use executor::{run_build, BuildExecutor, ShellExecutor};
pub use manifest::{Manifest, ResolvedBuild};
pub use server::{launch, validate_port, CoordinationServer, DetoxServer, ServerConfig};
pub use settings::Settings;

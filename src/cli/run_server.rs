//! `run-server` handler
//!
//! Starts the standalone Detox server and blocks until it shuts down.

use crate::cli::commands::RunServerArgs;
use crate::error::DetoxError;
use crate::server::{launch, DetoxServer};
use crate::settings::ServerSettings;

/// Run the standalone server.
///
/// # Arguments
/// * `args` - Parsed `run-server` arguments
/// * `settings` - Server settings supplying the default port and host
///
/// # Returns
/// * `Ok(())` - Server ran and was shut down
/// * `Err(e)` - Port was invalid or the server failed
pub async fn run_server_command(
    args: &RunServerArgs,
    settings: &ServerSettings,
) -> Result<(), DetoxError> {
    launch::<DetoxServer>(args.port.as_deref(), settings).await
}

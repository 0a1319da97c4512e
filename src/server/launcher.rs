//! Port validation and server start-up for `run-server`

use std::future::Future;

use serde::Serialize;

use crate::error::DetoxError;
use crate::settings::ServerSettings;

/// Configuration handed to a coordination server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Validated TCP port
    pub port: u16,
}

impl ServerConfig {
    /// Config for `port` on all interfaces
    pub fn new(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
        }
    }

    /// Bind to a specific interface
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// `host:port`, for logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A server that `run-server` can construct and hand control to
pub trait CoordinationServer: Sized {
    /// Construct the server; must not bind or spawn anything yet
    fn new(config: ServerConfig) -> Self;

    /// Run until the server shuts down
    fn start(self) -> impl Future<Output = Result<(), DetoxError>> + Send;
}

/// Whether `value` is an optionally signed run of ASCII digits
pub fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check that `port` is a usable TCP port
///
/// Any integer is accepted as input, however large, so that the error
/// echoes exactly what the user typed.
///
/// # Errors
/// * `DetoxError::InvalidPort` - If `port` is not an integer
/// * `DetoxError::PortOutOfRange` - If `port` is outside 1..=65535
pub fn validate_port(port: &str) -> Result<u16, DetoxError> {
    let port = port.trim();
    if !is_integer(port) {
        return Err(DetoxError::InvalidPort {
            value: port.to_string(),
        });
    }

    match port.parse::<u16>() {
        Ok(p) if p >= 1 => Ok(p),
        _ => Err(DetoxError::PortOutOfRange {
            port: port.to_string(),
        }),
    }
}

/// Build the server config from the `-p` argument, falling back to settings
pub fn server_config(
    port: Option<&str>,
    settings: &ServerSettings,
) -> Result<ServerConfig, DetoxError> {
    let port = match port {
        Some(raw) => validate_port(raw)?,
        None => validate_port(&settings.port.to_string())?,
    };
    Ok(ServerConfig::new(port).with_host(settings.host.clone()))
}

/// Validate the port, construct `S` and run it
///
/// `S` is never constructed when validation fails.
pub async fn launch<S: CoordinationServer>(
    port: Option<&str>,
    settings: &ServerSettings,
) -> Result<(), DetoxError> {
    let config = server_config(port, settings)?;
    tracing::info!("Starting Detox server on {}", config.addr());
    S::new(config).start().await
}

//! Error types for detox-cli
//!
//! Every failure the `build` and `run-server` commands can hit is a variant
//! of [`DetoxError`], with an optional hint for the user.

use thiserror::Error;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum DetoxError {
    /// Manifest file does not exist
    #[error("Cannot find manifest at {path}")]
    ManifestNotFound { path: String },

    /// Manifest exists but is not valid JSON
    #[error("Failed to parse {path}: {error}")]
    ManifestParse { path: String, error: String },

    /// `detox.configurations` is absent (or empty)
    #[error("Cannot find detox.configurations in {manifest}")]
    MissingConfigurations { manifest: String },

    /// Several configurations exist and none was selected
    #[error(
        "Cannot determine which configuration to use. Use --config to choose one of the following: {}",
        .available.join(", ")
    )]
    AmbiguousConfiguration { available: Vec<String> },

    /// Selected configuration name is not in the manifest
    #[error("Cannot find configuration \"{name}\" in detox.configurations")]
    UnknownConfiguration { name: String, available: Vec<String> },

    /// Selected configuration has no usable `build` field
    #[error("Could not find build script in detox.configurations[\"{name}\"].build")]
    MissingBuildScript { name: String },

    /// Failed to spawn the build shell
    #[error("Failed to spawn command: {command}")]
    SpawnFailed { command: String, error: String },

    /// Build command exited unsuccessfully
    #[error(
        "Command failed{}: {command}",
        .exit_code.map(|c| format!(" with exit code {}", c)).unwrap_or_default()
    )]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// `run-server` port outside the TCP range
    #[error("The port should be between 1 and 65535, got {port}")]
    PortOutOfRange { port: String },

    /// `run-server` port that is not an integer at all
    #[error("The port should be a number, got \"{value}\"")]
    InvalidPort { value: String },

    /// Coordination server failure
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetoxError {
    /// Hint printed under the error message, if there is something useful to say
    pub fn suggestion(&self) -> Option<String> {
        match self {
            DetoxError::ManifestNotFound { .. } => Some(
                "Run detox from your project root or pass --manifest <path/to/package.json>"
                    .to_string(),
            ),
            DetoxError::MissingConfigurations { .. } => Some(
                "Add a \"detox\": { \"configurations\": { ... } } section to your manifest"
                    .to_string(),
            ),
            DetoxError::AmbiguousConfiguration { available } => available
                .first()
                .map(|first| format!("For example: detox build -c {}", first)),
            DetoxError::UnknownConfiguration { available, .. } if !available.is_empty() => {
                Some(format!("Available configurations: {}", available.join(", ")))
            }
            DetoxError::MissingBuildScript { name } => Some(format!(
                "Add a \"build\" command to detox.configurations[\"{}\"]",
                name
            )),
            DetoxError::SpawnFailed { error, .. } => {
                Some(format!("Check that the configured shell exists: {}", error))
            }
            DetoxError::PortOutOfRange { .. } | DetoxError::InvalidPort { .. } => {
                Some("Pass a port with -p, e.g. detox run-server -p 8099".to_string())
            }
            _ => None,
        }
    }

    /// Process exit status for this error
    ///
    /// A failing build script's own exit code is passed through when it fits
    /// in a process status; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            DetoxError::CommandFailed {
                exit_code: Some(code),
                ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

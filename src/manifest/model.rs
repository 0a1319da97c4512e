//! Manifest model (`package.json`)
//!
//! Only the `detox` key is read; everything else in the file is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DetoxError;

/// Named configurations, ordered by name
pub type Configurations = BTreeMap<String, Configuration>;

/// Project manifest loaded from `package.json`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Manifest {
    /// The `detox` section, if present
    #[serde(default)]
    pub detox: Option<DetoxSection>,

    /// Where the manifest was read from
    #[serde(skip)]
    pub path: PathBuf,
}

/// The `detox` key of the manifest
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DetoxSection {
    /// `detox.configurations`
    #[serde(default)]
    pub configurations: Option<Configurations>,
}

/// A single entry of `detox.configurations`
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Configuration {
    /// Shell command that builds the app under test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,

    /// Remaining keys (`type`, `binaryPath`, ...), carried but not interpreted
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Configuration {
    /// Build command exactly as written, if present and not blank
    pub fn build_command(&self) -> Option<&str> {
        self.build
            .as_deref()
            .filter(|cmd| !cmd.trim().is_empty())
    }
}

impl Manifest {
    /// Load a manifest from a file path
    ///
    /// # Errors
    /// * `DetoxError::ManifestNotFound` - If the file does not exist
    /// * `DetoxError::ManifestParse` - If the file is not valid JSON
    /// * `DetoxError::Io` - If the file exists but cannot be read
    pub fn load(path: &Path) -> Result<Self, DetoxError> {
        if !path.is_file() {
            return Err(DetoxError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded manifest from: {}", path.display());
        Self::from_json(&content, path)
    }

    /// Parse a manifest from JSON text, recording `path` as its origin
    pub fn from_json(content: &str, path: impl Into<PathBuf>) -> Result<Self, DetoxError> {
        let path = path.into();
        let mut manifest: Manifest =
            serde_json::from_str(content).map_err(|e| DetoxError::ManifestParse {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;
        manifest.path = path;
        Ok(manifest)
    }

    /// File name used in error messages (e.g. `package.json`)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "package.json".to_string())
    }

    /// Directory holding the manifest, or `None` when it is the current directory
    pub fn project_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// `detox.configurations`, failing when the section is absent or empty
    pub fn configurations(&self) -> Result<&Configurations, DetoxError> {
        self.detox
            .as_ref()
            .and_then(|d| d.configurations.as_ref())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DetoxError::MissingConfigurations {
                manifest: self.file_name(),
            })
    }

    /// Configuration names in sorted order (empty when the section is missing)
    pub fn configuration_names(&self) -> Vec<String> {
        self.configurations()
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default()
    }
}

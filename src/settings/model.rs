//! Settings model for detox-cli

use serde::{Deserialize, Serialize};

/// Default port for `run-server`
pub const DEFAULT_SERVER_PORT: u16 = 8099;

/// Root settings structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Settings {
    /// `build` command settings
    #[serde(default)]
    pub build: BuildSettings,

    /// `run-server` command settings
    #[serde(default)]
    pub server: ServerSettings,
}

/// Settings used by the `build` command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildSettings {
    /// Shell used to run build scripts (invoked as `<shell> -c <script>`)
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Manifest path, relative to the current directory unless absolute
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_manifest() -> String {
    "package.json".to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            manifest: default_manifest(),
        }
    }
}

/// Settings used by the `run-server` command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Interface the server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port used when `-p` is not given. Kept wide so out-of-range values
    /// reach the same validation as the command line.
    #[serde(default = "default_port")]
    pub port: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> i64 {
    i64::from(DEFAULT_SERVER_PORT)
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

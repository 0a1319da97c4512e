//! Settings loader with XDG-compliant path resolution
//!
//! Loads settings from multiple locations with layered priority:
//! 1. `/etc/detox-cli/config.toml` (lowest priority)
//! 2. `~/.config/detox-cli/config.toml`
//! 3. `~/.detox-cli.toml`
//! 4. `./.detox-cli.toml`
//! 5. `--settings <path>`
//! 6. `DETOX_CLI_*` environment variables (highest priority)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Settings;

/// Application name used for XDG directories
const APP_NAME: &str = "detox-cli";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "DETOX_CLI_";

/// Candidate settings files, lowest priority first
fn settings_paths() -> Vec<PathBuf> {
    let file_name = format!(".{}.toml", APP_NAME);
    let system = PathBuf::from("/etc").join(APP_NAME).join("config.toml");
    let user = dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"));
    let home = dirs::home_dir().map(|dir| dir.join(&file_name));

    std::iter::once(system)
        .chain(user)
        .chain(home)
        .chain(std::iter::once(PathBuf::from(file_name)))
        .collect()
}

/// Settings files that exist on this machine, lowest priority first
pub fn find_settings_files() -> Vec<PathBuf> {
    settings_paths().into_iter().filter(|p| p.exists()).collect()
}

/// Load settings, layering every existing file over the defaults
///
/// `override_path` (from `--settings`) sits above the discovered files and
/// `DETOX_CLI_*` variables sit above everything, e.g.
/// `DETOX_CLI_SERVER__PORT=9000` sets `server.port`.
pub fn load_settings(override_path: Option<&str>) -> Result<Settings> {
    let override_file = override_path
        .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
        .filter(|path| {
            let found = path.exists();
            if !found {
                tracing::warn!("Override settings not found: {}", path.display());
            }
            found
        });

    let figment = find_settings_files()
        .into_iter()
        .chain(override_file)
        .fold(
            Figment::from(Serialized::defaults(Settings::default())),
            |figment, path| {
                tracing::debug!("Loading settings from: {}", path.display());
                figment.merge(Toml::file(path))
            },
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment.extract().context("Failed to load settings")
}

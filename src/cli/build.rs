//! `build` handler

use std::path::PathBuf;

use crate::cli::commands::BuildArgs;
use crate::error::DetoxError;
use crate::executor::{run_build, ShellExecutor};
use crate::manifest::{Manifest, ResolvedBuild};
use crate::settings::BuildSettings;

/// Resolve the manifest location, expanding `~` and `$VARS`
pub fn manifest_path(manifest_override: Option<&str>, settings: &BuildSettings) -> PathBuf {
    let raw = manifest_override.unwrap_or(&settings.manifest);
    let expanded = shellexpand::full(raw)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(raw).into_owned());
    PathBuf::from(expanded)
}

/// Load the manifest and run the selected configuration's build script.
///
/// The script runs in the manifest's directory with the configured shell.
pub fn run_build_command(
    args: &BuildArgs,
    manifest_override: Option<&str>,
    settings: &BuildSettings,
) -> Result<ResolvedBuild, DetoxError> {
    let path = manifest_path(manifest_override, settings);
    let manifest = Manifest::load(&path)?;
    tracing::debug!(
        "Configurations in {}: [{}]",
        path.display(),
        manifest.configuration_names().join(", ")
    );

    let mut executor = ShellExecutor::new(&settings.shell);
    if let Some(dir) = manifest.project_dir() {
        executor = executor.in_dir(dir);
    }

    run_build(&manifest, args.configuration.as_deref(), &executor)
}

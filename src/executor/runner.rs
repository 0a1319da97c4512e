//! Synchronous shell execution for build scripts
//!
//! The build command is handed to `<shell> -c` with stdin, stdout and stderr
//! inherited, so the script's output streams straight to the terminal.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::error::DetoxError;
use crate::manifest::{Manifest, ResolvedBuild};

/// Environment variable exposing the selected configuration to the build script
pub const CONFIGURATION_ENV: &str = "DETOX_CONFIGURATION";

/// Executes a resolved build
///
/// `build` depends on this trait rather than on [`ShellExecutor`] so the
/// command that would run can be observed without spawning anything.
#[cfg_attr(test, mockall::automock)]
pub trait BuildExecutor {
    /// Run the build to completion
    ///
    /// # Errors
    /// * `DetoxError::SpawnFailed` - If the shell could not be started
    /// * `DetoxError::CommandFailed` - If the command exited unsuccessfully
    fn execute(&self, build: &ResolvedBuild) -> Result<(), DetoxError>;
}

/// Runs build commands through a shell
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    /// Shell program, looked up on `PATH` unless it is a path
    shell: String,
    /// Working directory (defaults to the current directory)
    working_dir: Option<PathBuf>,
    /// Extra environment variables
    env: HashMap<String, String>,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl ShellExecutor {
    /// Create an executor using the given shell
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            working_dir: None,
            env: HashMap::new(),
        }
    }

    /// Run commands in `dir`
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    fn resolve_shell(&self, command: &str) -> Result<PathBuf, DetoxError> {
        which::which(&self.shell).map_err(|e| DetoxError::SpawnFailed {
            command: command.to_string(),
            error: format!("{}: {}", self.shell, e),
        })
    }
}

impl BuildExecutor for ShellExecutor {
    fn execute(&self, build: &ResolvedBuild) -> Result<(), DetoxError> {
        let shell = self.resolve_shell(&build.command)?;

        let mut cmd = Command::new(&shell);
        cmd.arg("-c").arg(&build.command);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.env(CONFIGURATION_ENV, &build.name);

        tracing::info!(
            configuration = %build.name,
            shell = %shell.display(),
            "Running build: {}",
            build.command
        );
        let start = Instant::now();

        let status = cmd.status().map_err(|e| DetoxError::SpawnFailed {
            command: build.command.clone(),
            error: e.to_string(),
        })?;

        tracing::debug!(
            "Build for '{}' exited with {:?} after {}ms",
            build.name,
            status.code(),
            start.elapsed().as_millis()
        );

        if status.success() {
            Ok(())
        } else {
            Err(DetoxError::CommandFailed {
                command: build.command.clone(),
                exit_code: status.code(),
            })
        }
    }
}

/// Resolve the build for `configuration` and execute it
///
/// The executor is only called once resolution has succeeded.
pub fn run_build<E: BuildExecutor + ?Sized>(
    manifest: &Manifest,
    configuration: Option<&str>,
    executor: &E,
) -> Result<ResolvedBuild, DetoxError> {
    let build = manifest.resolve_build(configuration)?;
    executor.execute(&build)?;
    Ok(build)
}

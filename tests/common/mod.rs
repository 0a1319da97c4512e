//! Common test utilities for detox-cli tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Creates a temporary project directory with the given package.json
pub fn create_project(package_json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manifest_path = dir.path().join("package.json");
    std::fs::write(&manifest_path, package_json).expect("Failed to write package.json");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// `detox` binary running in `dir`, isolated from user settings
pub fn detox(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("detox").expect("detox binary not built");
    cmd.current_dir(dir)
        .env_remove("DETOX_MANIFEST")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

/// Single configuration with a build script
pub const SINGLE_CONFIG: &str = r#"{
  "name": "example",
  "detox": {
    "configurations": {
      "only": { "build": "echo \"I was build\"" }
    }
  }
}"#;

/// Two configurations, each writing its own marker file
pub const TWO_CONFIGS: &str = r#"{
  "name": "example",
  "detox": {
    "configurations": {
      "only": { "build": "echo \"I was build\" && touch only.marker" },
      "myconf": { "build": "echo \"Something else\" && touch myconf.marker" }
    }
  }
}"#;

/// No `detox` section at all
pub const NO_CONFIGS: &str = r#"{ "name": "example" }"#;

/// A configuration without a `build` field
pub const NO_BUILD_SCRIPT: &str = r#"{
  "detox": {
    "configurations": {
      "only": { "type": "ios.simulator" }
    }
  }
}"#;

/// A build script that fails with exit code 7
pub const FAILING_BUILD: &str = r#"{
  "detox": {
    "configurations": {
      "broken": { "build": "echo compiling && exit 7" }
    }
  }
}"#;

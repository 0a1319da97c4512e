//! End-to-end tests for the `detox` binary

mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_both_commands() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[convenience method] Run the command defined in 'configuration.build'",
        ))
        .stdout(predicate::str::contains("Start a standalone Detox server"));
}

#[test]
fn test_build_runs_the_only_configuration() {
    let (_dir, path) = create_project(SINGLE_CONFIG);

    detox(&path)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("I was build"));
}

#[test]
fn test_build_runs_the_selected_configuration() {
    let (_dir, path) = create_project(TWO_CONFIGS);

    detox(&path)
        .args(["build", "-c", "myconf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Something else"))
        .stdout(predicate::str::contains("I was build").not());

    assert!(path.join("myconf.marker").exists());
    assert!(!path.join("only.marker").exists());
}

#[test]
fn test_build_fails_with_multiple_configurations_and_no_selection() {
    let (_dir, path) = create_project(TWO_CONFIGS);

    detox(&path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot determine which configuration"));

    assert!(!path.join("myconf.marker").exists());
    assert!(!path.join("only.marker").exists());
}

#[test]
fn test_build_fails_without_configurations() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot find detox.configurations in package.json",
        ));
}

#[test]
fn test_build_fails_without_build_script() {
    let (_dir, path) = create_project(NO_BUILD_SCRIPT);
    let expected = r#"Could not find build script in detox.configurations["only"].build"#;

    detox(&path)
        .args(["build", "-c", "only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(expected));

    detox(&path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains(expected));
}

#[test]
fn test_build_fails_for_unknown_configuration() {
    let (_dir, path) = create_project(TWO_CONFIGS);

    detox(&path)
        .args(["build", "--configuration", "android"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"android\""))
        .stderr(predicate::str::contains("myconf, only"));
}

#[test]
fn test_build_passes_through_script_exit_code() {
    let (_dir, path) = create_project(FAILING_BUILD);

    detox(&path)
        .arg("build")
        .assert()
        .code(7)
        .stdout(predicate::str::contains("compiling"))
        .stderr(predicate::str::contains("Command failed with exit code 7"));
}

#[test]
fn test_build_with_explicit_manifest_path() {
    let (_dir, path) = create_project(SINGLE_CONFIG);
    let elsewhere = tempfile::TempDir::new().unwrap();

    detox(elsewhere.path())
        .args(["build", "--manifest"])
        .arg(path.join("package.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("I was build"));
}

#[test]
fn test_build_fails_when_manifest_is_missing() {
    let dir = tempfile::TempDir::new().unwrap();

    detox(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find manifest"));
}

#[test]
fn test_run_server_rejects_out_of_range_port() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .args(["run-server", "-p", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The port should be between 1 and 65535, got 100000",
        ))
        .stderr(predicate::str::contains("listening").not());
}

#[test]
fn test_run_server_rejects_zero_port() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .args(["run-server", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The port should be between 1 and 65535, got 0",
        ));
}

#[test]
fn test_run_server_rejects_port_too_large_for_any_integer_type() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .args(["run-server", "-p", "99999999999999999999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "The port should be between 1 and 65535, got 99999999999999999999",
        ));
}

#[test]
fn test_run_server_validates_port_from_settings() {
    let (_dir, path) = create_project(NO_CONFIGS);

    detox(&path)
        .arg("run-server")
        .env("DETOX_CLI_SERVER__PORT", "70000")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The port should be between 1 and 65535, got 70000",
        ));
}

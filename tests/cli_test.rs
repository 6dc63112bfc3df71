//! Integration tests for CLI argument parsing and preflight failures.
// The cargo_bin function is marked deprecated in favor of the cargo_bin!
// macro, but both work correctly. Suppressing until assert_cmd stabilizes
// the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("license-audited vendoring"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_a_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn vendor_without_lock_package_fails_with_guidance(
) -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.current_dir(temp.path());
    cmd.args(["vendor"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--lock-package"));
    Ok(())
}

#[test]
fn vendor_outside_a_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.current_dir(temp.path());
    cmd.args(["vendor", "--lock-package", "app-shell"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "no git or mercurial repository",
    ));
    Ok(())
}

#[test]
fn vendor_with_malformed_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    std::fs::write(temp.path().join(".cargohold.yml"), "not_a_field: true\n")?;
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.current_dir(temp.path());
    cmd.args(["vendor", "--lock-package", "app-shell"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
    Ok(())
}

#[test]
fn completions_generate_bash_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("cargohold"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cargohold"));
    Ok(())
}

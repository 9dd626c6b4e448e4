//! Command-line surface of the xptpack binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn xptpack(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("xptpack").unwrap();
    cmd.env_clear()
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .env("NO_COLOR", "1")
        .current_dir(workdir);
    cmd
}

#[test]
fn prints_version() {
    let dir = TempDir::new().unwrap();
    xptpack(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_unknown_subcommand() {
    let dir = TempDir::new().unwrap();
    xptpack(dir.path())
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn rejects_missing_workdir() {
    let dir = TempDir::new().unwrap();
    xptpack(dir.path())
        .args(["--workdir", "does-not-exist", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working directory"));
}

#[test]
fn export_without_packaging_writes_staging_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Main.cs"), "namespace Demo {}\n").unwrap();

    xptpack(dir.path())
        .args(["export", "--name", "Demo", "--skip-package", "--report-json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"succeeded\""));

    let main = fs::read_to_string(dir.path().join("ProjectTemplate/Main.cs")).unwrap();
    assert_eq!(main, "namespace ${Namespace} {}\n");
    assert!(dir.path().join("Demo.addin.xml").is_file());
    assert!(dir.path().join("ProjectTemplate.xpt.xml").is_file());
}

#[test]
fn export_fails_when_packager_missing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Main.cs"), "class A {}\n").unwrap();

    xptpack(dir.path())
        .args(["--packager", "xptpack-no-such-tool", "export", "--name", "Demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed at package"));

    assert!(dir.path().join("ProjectTemplate/Main.cs").is_file());
    assert!(!dir.path().join(".xptpack.lock").exists());
}

#[test]
fn clean_removes_outputs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("ProjectTemplate")).unwrap();
    fs::write(dir.path().join("ProjectTemplate/Main.cs"), "x").unwrap();
    fs::write(dir.path().join("Demo_1.0.0.mpack"), "zip").unwrap();
    fs::write(dir.path().join("Main.cs"), "x").unwrap();

    xptpack(dir.path()).arg("clean").assert().success();

    assert!(!dir.path().join("ProjectTemplate").exists());
    assert!(!dir.path().join("Demo_1.0.0.mpack").exists());
    assert!(dir.path().join("Main.cs").is_file());
}

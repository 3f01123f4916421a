//! End-to-end startup checks through the `check` subcommand.
//!
//! These tests run the real binary against synthetic asset roots with the
//! per-user directories redirected into a temp home, and assert the exit
//! status, console output and log sink contract.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// Create a complete asset root: all four required sub-paths with their
/// minimal contents.
fn complete_assets(root: &Path) {
    for sub in ["schema", "ui", "shared", "locale"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(
        root.join("schema/0001_init.sql"),
        "CREATE TABLE IF NOT EXISTS app_meta (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
    )
    .unwrap();
    fs::write(
        root.join("ui/theme.toml"),
        "[styles.default]\naccent = \"cyan\"\n",
    )
    .unwrap();
    fs::write(root.join("shared/trial_balance.tmpl"), "Trial balance\n").unwrap();
    fs::write(
        root.join("locale/en.toml"),
        "[labels]\ndashboard = \"Dashboard\"\n",
    )
    .unwrap();
}

struct TestEnv {
    home: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: tempdir().unwrap(),
        }
    }

    fn command(&self, assets: &Path) -> Command {
        let mut cmd = Command::cargo_bin("defter").unwrap();
        cmd.arg("check")
            .arg("--assets")
            .arg(assets)
            .env("HOME", self.home.path())
            .env("XDG_DATA_HOME", self.home.path().join("data"))
            .env("XDG_CONFIG_HOME", self.home.path().join("config"));
        cmd
    }

    fn log_contents(&self) -> String {
        let log = self
            .home
            .path()
            .join("data")
            .join("defter")
            .join("defter.log");
        fs::read_to_string(log).unwrap_or_default()
    }
}

#[test]
fn missing_storage_layer_halts_with_status_one() {
    let assets = tempdir().unwrap();
    complete_assets(assets.path());
    fs::remove_dir_all(assets.path().join("schema")).unwrap();

    let env = TestEnv::new();
    env.command(assets.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("[FAIL] paths:schema"));

    // The log sink holds an entry citing the missing path.
    let log = env.log_contents();
    assert!(log.contains("paths:schema"), "log cites the failed check: {log}");
    assert!(log.contains("schema"), "log names the missing path");
}

#[test]
fn every_required_path_is_reported_even_after_a_failure() {
    let assets = tempdir().unwrap();
    complete_assets(assets.path());
    fs::remove_dir_all(assets.path().join("locale")).unwrap();

    let env = TestEnv::new();
    env.command(assets.path())
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("[PASS] paths:schema")
                .and(predicate::str::contains("[PASS] paths:ui"))
                .and(predicate::str::contains("[PASS] paths:shared"))
                .and(predicate::str::contains("[FAIL] paths:locale")),
        );
}

#[test]
fn capability_failure_names_capability_and_purpose() {
    let assets = tempdir().unwrap();
    complete_assets(assets.path());

    // Under the test harness stdout is not a terminal, so the
    // terminal-backend capability must fail all-or-nothing, after the path
    // battery passed.
    let env = TestEnv::new();
    env.command(assets.path())
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("terminal-backend")
                .and(predicate::str::contains("interactive terminal")),
        )
        .stdout(predicate::str::contains("[PASS] paths:schema"));
}

#[test]
fn path_failure_precedes_capability_checks() {
    let assets = tempdir().unwrap();
    // Entirely empty asset root: all four paths fail, and the capability
    // battery never runs.
    let env = TestEnv::new();
    env.command(assets.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("capability:").not());
}

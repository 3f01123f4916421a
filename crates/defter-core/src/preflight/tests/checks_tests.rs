use std::fs;

use tempfile::{TempDir, tempdir};

use crate::kernel::constants;
use crate::preflight::capability::capability_checks;
use crate::preflight::error::PreflightError;
use crate::preflight::paths::required_path_checks;
use crate::preflight::{
    CheckOutcome, CheckResult, PreflightCheck, PreflightContext, StartupReport, run_checks,
};

/// Check with a fixed outcome, for battery-mechanics tests.
struct FixedCheck {
    id: &'static str,
    name: &'static str,
    outcome: CheckResult,
}

impl PreflightCheck for FixedCheck {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn purpose(&self) -> &str {
        "battery mechanics test"
    }

    fn run(&self, _ctx: &PreflightContext) -> CheckResult {
        self.outcome.clone()
    }
}

fn ctx_for(dir: &TempDir) -> PreflightContext {
    PreflightContext::new(dir.path().to_path_buf())
}

/// Asset root with every required sub-directory present.
fn complete_asset_root() -> TempDir {
    let dir = tempdir().expect("create asset root");
    for sub in [
        constants::SCHEMA_DIR,
        constants::UI_DIR,
        constants::SHARED_DIR,
        constants::LOCALE_DIR,
    ] {
        fs::create_dir_all(dir.path().join(sub)).expect("create sub dir");
    }
    dir
}

#[test]
fn battery_evaluates_every_check_before_failing() {
    let checks: Vec<Box<dyn PreflightCheck>> = vec![
        Box::new(FixedCheck {
            id: "t:first",
            name: "first requirement",
            outcome: Err("first is missing".to_string()),
        }),
        Box::new(FixedCheck {
            id: "t:second",
            name: "second requirement",
            outcome: Ok("present".to_string()),
        }),
        Box::new(FixedCheck {
            id: "t:third",
            name: "third requirement",
            outcome: Err("third is missing".to_string()),
        }),
    ];
    let dir = tempdir().unwrap();
    let mut report = StartupReport::new();

    let result = run_checks(&checks, &ctx_for(&dir), &mut report);

    // Every check produced an entry, in battery order.
    let ids: Vec<&str> = report.entries().iter().map(|e| e.check.as_str()).collect();
    assert_eq!(ids, vec!["t:first", "t:second", "t:third"]);
    assert_eq!(report.failures().count(), 2);

    let err = result.expect_err("two failures must fail the battery");
    let PreflightError::ChecksFailed { failed } = err;
    assert_eq!(failed.len(), 2);
    assert!(failed[0].contains("first requirement"));
    assert!(failed[1].contains("third requirement"));
}

#[test]
fn required_paths_pass_when_all_present() {
    let dir = complete_asset_root();
    let mut report = StartupReport::new();

    run_checks(&required_path_checks(), &ctx_for(&dir), &mut report)
        .expect("complete asset root passes");

    assert_eq!(report.entries().len(), 4);
    assert!(report
        .entries()
        .iter()
        .all(|e| e.outcome == CheckOutcome::Passed));
}

#[test]
fn missing_storage_layer_is_reported_by_name() {
    let dir = complete_asset_root();
    fs::remove_dir(dir.path().join(constants::SCHEMA_DIR)).unwrap();
    let mut report = StartupReport::new();

    let err = run_checks(&required_path_checks(), &ctx_for(&dir), &mut report)
        .expect_err("missing schema dir fails the battery");

    // The report still holds one entry per required path.
    assert_eq!(report.entries().len(), 4);
    let schema_entry = report
        .entries()
        .iter()
        .find(|e| e.check == "paths:schema")
        .expect("schema entry recorded");
    assert_eq!(schema_entry.outcome, CheckOutcome::Failed);
    assert!(schema_entry.detail.contains(constants::SCHEMA_DIR));

    assert!(err.to_string().contains("storage layer assets"));
}

#[test]
fn capability_battery_has_fixed_order_and_purposes() {
    let checks = capability_checks();
    let ids: Vec<&str> = checks.iter().map(|c| c.id()).collect();
    assert_eq!(
        ids,
        vec![
            "capability:terminal-backend",
            "capability:storage-driver",
            "capability:user-dirs",
            "capability:locale-bundle",
        ]
    );
    // Every capability carries an operator-readable purpose.
    assert!(checks.iter().all(|c| !c.purpose().is_empty()));
}

#[test]
fn storage_driver_capability_probes_sqlite() {
    let dir = tempdir().unwrap();
    let check = capability_checks()
        .into_iter()
        .find(|c| c.id() == "capability:storage-driver")
        .unwrap();

    let detail = check.run(&ctx_for(&dir)).expect("bundled sqlite loads");
    assert!(detail.contains("sqlite"));
}

#[test]
fn locale_bundle_capability_requires_parseable_bundle() {
    let dir = complete_asset_root();
    let bundle = dir
        .path()
        .join(constants::LOCALE_DIR)
        .join(constants::DEFAULT_LOCALE_BUNDLE);
    let check = capability_checks()
        .into_iter()
        .find(|c| c.id() == "capability:locale-bundle")
        .unwrap();

    // Missing bundle fails.
    assert!(check.run(&ctx_for(&dir)).is_err());

    // Valid TOML passes.
    fs::write(&bundle, "[labels]\ndashboard = \"Dashboard\"\n").unwrap();
    assert!(check.run(&ctx_for(&dir)).is_ok());

    // Malformed TOML fails and names the file.
    fs::write(&bundle, "labels = [unclosed").unwrap();
    let detail = check.run(&ctx_for(&dir)).expect_err("malformed bundle fails");
    assert!(detail.contains(constants::DEFAULT_LOCALE_BUNDLE));
}

#[test]
fn report_is_append_only_and_ordered() {
    let mut report = StartupReport::new();
    report.record("a", CheckOutcome::Passed, "one");
    report.record("b", CheckOutcome::Failed, "two");
    report.record("c", CheckOutcome::Passed, "three");

    let checks: Vec<&str> = report.entries().iter().map(|e| e.check.as_str()).collect();
    assert_eq!(checks, vec!["a", "b", "c"]);
    assert!(report.has_failures());
    assert_eq!(report.failures().count(), 1);
}

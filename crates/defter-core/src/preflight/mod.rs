//! Precondition checking.
//!
//! Before any shared infrastructure is initialized, two ordered batteries of
//! checks run: the required-path battery (bundled asset layout) and the
//! capability battery (runtime facilities every business module assumes).
//! Every check is evaluated and recorded in the [`StartupReport`] even when
//! an earlier one already failed, so the operator sees the complete picture;
//! a battery with any failure then halts startup.

pub mod capability;
pub mod error;
pub mod paths;

use std::path::{Path, PathBuf};

use crate::preflight::error::PreflightError;

/// Outcome of a single preflight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed,
}

/// Result of running one check: pass detail or failure detail.
pub type CheckResult = std::result::Result<String, String>;

/// One recorded precondition or initialization outcome.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub check: String,
    pub outcome: CheckOutcome,
    pub detail: String,
}

/// Ordered, append-only log of precondition and initialization outcomes for
/// one process run. Every entry is mirrored to the log sink.
#[derive(Debug, Default)]
pub struct StartupReport {
    entries: Vec<ReportEntry>,
}

impl StartupReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and mirror it to the log sink.
    pub fn record(&mut self, check: &str, outcome: CheckOutcome, detail: impl Into<String>) {
        let detail = detail.into();
        match outcome {
            CheckOutcome::Passed => log::info!("{}: ok - {}", check, detail),
            CheckOutcome::Failed => log::error!("{}: FAILED - {}", check, detail),
        }
        self.entries.push(ReportEntry {
            check: check.to_string(),
            outcome,
            detail,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == CheckOutcome::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// A runtime condition that must hold before initialization proceeds.
pub trait PreflightCheck: Send + Sync {
    /// Stable identifier used in the report, e.g. `paths:schema`.
    fn id(&self) -> &str;

    /// Human-readable name of the checked requirement.
    fn name(&self) -> &str;

    /// What the requirement is for, phrased for the operator.
    fn purpose(&self) -> &str;

    /// Evaluate the condition.
    fn run(&self, ctx: &PreflightContext) -> CheckResult;
}

/// Context shared by all preflight checks.
pub struct PreflightContext {
    asset_root: PathBuf,
}

impl PreflightContext {
    pub fn new(asset_root: PathBuf) -> Self {
        Self { asset_root }
    }

    /// Root of the bundled runtime assets.
    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }
}

/// Run a battery of checks in order, recording one report entry per check.
///
/// All checks are evaluated; if any failed, the returned error names every
/// failed requirement together with its purpose.
pub fn run_checks(
    checks: &[Box<dyn PreflightCheck>],
    ctx: &PreflightContext,
    report: &mut StartupReport,
) -> std::result::Result<(), PreflightError> {
    let mut failed = Vec::new();
    for check in checks {
        match check.run(ctx) {
            Ok(detail) => report.record(check.id(), CheckOutcome::Passed, detail),
            Err(detail) => {
                report.record(check.id(), CheckOutcome::Failed, detail.clone());
                failed.push(format!("{} ({}): {}", check.name(), check.purpose(), detail));
            }
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(PreflightError::ChecksFailed { failed })
    }
}

#[cfg(test)]
mod tests;

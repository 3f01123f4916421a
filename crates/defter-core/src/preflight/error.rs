use thiserror::Error as ThisError;

/// Errors raised by the precondition checker.
#[derive(Debug, ThisError)]
pub enum PreflightError {
    /// One or more checks in a battery failed. Each entry names the
    /// requirement, its purpose and the failure detail.
    #[error("{} precondition check(s) failed: {}", failed.len(), failed.join("; "))]
    ChecksFailed { failed: Vec<String> },
}

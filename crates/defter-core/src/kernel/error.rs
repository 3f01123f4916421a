//! Kernel error types.
//!
//! [`Error`] aggregates the typed errors of every subsystem so that the
//! startup sequence can propagate any failure upward with `?` and report it
//! through one channel. Subsystem errors convert via `#[from]`; lifecycle
//! failures that occur between subsystems carry their phase explicitly.

use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::fault::error::FaultError;
use crate::module_system::error::ModuleSystemError;
use crate::preflight::error::PreflightError;
use crate::shell::error::ShellError;
use crate::storage::error::StorageError;

/// Aggregate error type for the orchestration core.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Precondition checking failed (missing path or capability).
    #[error("preflight error: {0}")]
    Preflight(#[from] PreflightError),

    /// The fault-reporting infrastructure itself failed.
    #[error("fault reporting error: {0}")]
    Fault(#[from] FaultError),

    /// Storage initialization or configuration loading failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Module registration or construction failed.
    #[error("module system error: {0}")]
    ModuleSystem(#[from] ModuleSystemError),

    /// Shell composition or frontend failure.
    #[error("shell error: {0}")]
    Shell(#[from] ShellError),

    /// Failure in a specific kernel lifecycle phase.
    #[error("kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycle {
        phase: LifecyclePhase,
        component: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// A phase of the kernel's lifecycle, carried by lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Bootstrap,
    Initialize,
    Start,
    RunPreCheck,
    Run,
    Shutdown,
}

/// Shorthand for results with the kernel error type.
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

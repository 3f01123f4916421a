//! # Defter Core
//!
//! Orchestration core for the Defter business-management shell: precondition
//! checking, fault reporting, storage initialization, module composition and
//! the run loop driver. The concrete UI toolkit and the business modules
//! live in separate crates and plug into the seams defined here.

pub mod fault;
pub mod kernel;
pub mod module_system;
pub mod preflight;
pub mod shell;
pub mod storage;

// Re-export the key public types for the binary and the module crates.
pub use fault::{FaultReporter, LogSink};
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use module_system::{BusinessModule, ModuleContext, ModuleDescriptor, ModuleRegistry};
pub use preflight::{PreflightContext, StartupReport};
pub use shell::{Shell, ShellAction, ShellFrontend, ShellState};
pub use storage::StorageManager;
pub use storage::config::ShellConfig;

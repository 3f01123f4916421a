//! Fault reporting.
//!
//! Two pieces of process-wide infrastructure live here: the [`LogSink`] all
//! components log through, and the [`FaultReporter`] whose panic interceptor
//! is the last line of defense against uncaught failures. Both are
//! constructed explicitly by the process entry point; the interceptor is
//! installed exactly once and stays installed until process exit.

pub mod error;
pub mod sink;

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::fault::error::FaultError;
use crate::kernel::constants;
pub use crate::fault::sink::LogSink;

// Process-wide installation guard. The hook itself is global state, so the
// guard must be too, independent of how many reporter instances exist.
static INTERCEPTOR_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Severity of a fault record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// One unrecoverable condition, written to the sink and never mutated.
#[derive(Debug, Clone)]
pub struct FaultRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub context: String,
}

impl FaultRecord {
    pub fn new(severity: Severity, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Process-wide last-resort failure handler.
///
/// Owned by the process entry point and handed to whoever needs to report
/// faults explicitly; the installed panic hook covers everything else.
pub struct FaultReporter {
    sink: LogSink,
}

impl FaultReporter {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }

    /// Write one fault record to the sink and summarize it on stderr.
    pub fn report(&self, record: &FaultRecord) {
        self.sink.write_fault(record);
        eprintln!(
            "{}: {} ({})",
            record.severity.as_str(),
            record.message,
            record.context
        );
    }

    /// Install the process-wide panic interceptor.
    ///
    /// Must be called exactly once, as early as possible; a second call is
    /// an error. On an uncaught panic the hook writes one fault record,
    /// prints a summary, invokes the previously installed (default) hook
    /// for the platform's standard presentation, and terminates the process
    /// with a non-zero status.
    pub fn install(&self) -> Result<(), FaultError> {
        if INTERCEPTOR_INSTALLED.swap(true, Ordering::SeqCst) {
            return Err(FaultError::InterceptorAlreadyInstalled);
        }
        let sink = self.sink.clone();
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let message = panic_message(info);
            let context = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_else(|| "unknown location".to_string());
            let record = FaultRecord::new(Severity::Critical, message, context);
            sink.write_fault(&record);
            eprintln!(
                "fatal: {} (at {}); see {}",
                record.message,
                record.context,
                sink.path().display()
            );
            previous(info);
            std::process::exit(constants::EXIT_FAILURE);
        }));
        log::info!("fault interceptor installed");
        Ok(())
    }
}

/// Extract a readable message from a panic payload.
fn panic_message(info: &panic::PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "unhandled fault with opaque payload".to_string()
    }
}

#[cfg(test)]
mod tests;

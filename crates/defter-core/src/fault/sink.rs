//! Append-only log sink shared by every component.
//!
//! One line per record, `timestamp - component - level - message`. The sink
//! registers itself with the `log` facade so components log through the
//! standard macros; warnings and errors are additionally mirrored to stderr.
//! Single writer at a time is enforced with a mutex, which also makes the
//! sink safe to use from the panic interceptor.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record};

use crate::fault::FaultRecord;
use crate::fault::error::FaultError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Clone)]
pub struct LogSink {
    inner: Arc<SinkInner>,
}

struct SinkInner {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogSink {
    /// Open (or create) the sink file in append mode, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> Result<Self, FaultError> {
        let open = || -> std::io::Result<File> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            OpenOptions::new().create(true).append(true).open(path)
        };
        let file = open().map_err(|source| FaultError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            inner: Arc::new(SinkInner {
                path: path.to_path_buf(),
                file: Mutex::new(file),
            }),
        })
    }

    /// Register this sink with the `log` facade. Can only succeed once per
    /// process; the sink handle keeps working either way.
    pub fn register(&self) -> Result<(), FaultError> {
        log::set_boxed_logger(Box::new(self.clone())).map_err(|_| FaultError::LoggerAlreadySet)?;
        log::set_max_level(LevelFilter::Info);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Append one formatted line. Best-effort: a sink write failure must
    /// never take down the caller.
    pub fn write_line(&self, component: &str, level: &str, message: &str) {
        let line = format!(
            "{} - {} - {} - {}\n",
            Utc::now().format(TIMESTAMP_FORMAT),
            component,
            level,
            message
        );
        if let Ok(mut file) = self.inner.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }

    /// Append a fault record under the `fault` component.
    pub fn write_fault(&self, record: &FaultRecord) {
        self.write_line(
            "fault",
            record.severity.as_str(),
            &format!("{} [{}]", record.message, record.context),
        );
    }
}

impl log::Log for LogSink {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        self.write_line(record.target(), record.level().as_str(), &message);
        if record.level() <= Level::Warn {
            eprintln!("{}: {}", record.level(), message);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.inner.file.lock() {
            let _ = file.flush();
        }
    }
}

impl std::fmt::Debug for LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSink")
            .field("path", &self.inner.path)
            .finish()
    }
}

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors raised by the fault-reporting infrastructure.
#[derive(Debug, ThisError)]
pub enum FaultError {
    #[error("cannot open log sink at '{path}': {source}")]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a logger is already registered with the logging facade")]
    LoggerAlreadySet,

    #[error("the fault interceptor is already installed")]
    InterceptorAlreadyInstalled,
}

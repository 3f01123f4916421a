use thiserror::Error as ThisError;

/// Errors raised by shell composition or a shell frontend.
#[derive(Debug, ThisError)]
pub enum ShellError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frontend '{frontend}' failed: {message}")]
    Frontend { frontend: String, message: String },
}

impl ShellError {
    pub fn frontend(frontend: impl Into<String>, message: impl Into<String>) -> Self {
        ShellError::Frontend {
            frontend: frontend.into(),
            message: message.into(),
        }
    }
}

use std::error::Error as StdError;

use thiserror::Error as ThisError;

/// Errors raised by module registration and construction.
#[derive(Debug, ThisError)]
pub enum ModuleSystemError {
    #[error("module id already registered: {id}")]
    DuplicateId { id: String },

    #[error("module '{module}' failed to construct: {source}")]
    Construction {
        module: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ModuleSystemError {
    /// Wrap an arbitrary constructor failure for the named module.
    pub fn construction(
        module: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        ModuleSystemError::Construction {
            module: module.into(),
            source: Box::new(source),
        }
    }
}

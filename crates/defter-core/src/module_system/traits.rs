use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::module_system::error::ModuleSystemError;
use crate::storage::SharedConnection;

/// The displayable unit a business module exposes to the shell.
///
/// Tab labels come from the module's descriptor; the trait carries only what
/// the frontend renders into the tab body. Modules run on the single UI
/// thread, so `Send` is all the shell requires.
pub trait BusinessModule: Send + std::fmt::Debug {
    /// Lines of content rendered into the module's tab.
    fn body_lines(&self) -> Vec<String>;
}

/// Everything a module constructor may depend on.
///
/// Deliberately narrow: the shared storage handle and the bundled asset
/// root. A module must not assume any other module exists, and nothing here
/// lets it reach one.
#[derive(Clone)]
pub struct ModuleContext {
    connection: SharedConnection,
    asset_root: PathBuf,
}

impl ModuleContext {
    pub fn new(connection: SharedConnection, asset_root: PathBuf) -> Self {
        Self {
            connection,
            asset_root,
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Run a closure against the shared connection.
    ///
    /// Wraps locking and error conversion so constructors stay at the level
    /// of their own SQL.
    pub fn with_connection<T>(
        &self,
        module: &str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, ModuleSystemError> {
        let guard = self
            .connection
            .lock()
            .map_err(|_| ModuleSystemError::Construction {
                module: module.to_string(),
                source: "storage connection lock is poisoned".into(),
            })?;
        f(&guard).map_err(|e| ModuleSystemError::construction(module, e))
    }
}

//! Persistent storage initialization.
//!
//! [`StorageManager`] prepares the per-user data directory, opens the SQLite
//! database and applies the bundled schema, exactly once per process start
//! and strictly before any business module is constructed. The open
//! connection is shared with module constructors through the module context.

pub mod config;
pub mod error;

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::kernel::component::KernelComponent;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::storage::error::StorageError;

/// Shared handle to the open database connection.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub struct StorageManager {
    name: &'static str,
    data_dir: PathBuf,
    schema_dir: PathBuf,
    database_path: PathBuf,
    connection: Mutex<Option<SharedConnection>>,
}

impl StorageManager {
    /// Create a manager for the given per-user data directory and bundled
    /// schema directory. Nothing touches the filesystem until `initialize`.
    pub fn new(data_dir: PathBuf, schema_dir: PathBuf) -> Self {
        let database_path = data_dir.join(constants::DATABASE_FILE_NAME);
        Self {
            name: "StorageManager",
            data_dir,
            schema_dir,
            database_path,
            connection: Mutex::new(None),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Handle to the open connection; fails before initialization.
    pub fn connection(&self) -> std::result::Result<SharedConnection, StorageError> {
        self.connection
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .clone()
            .ok_or(StorageError::NotInitialized)
    }

    /// Open the database and apply every bundled `*.sql` file in lexical
    /// order, one batch per file.
    fn open_and_migrate(&self) -> std::result::Result<Connection, StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::io(e, "create data directory", self.data_dir.clone()))?;

        let conn = Connection::open(&self.database_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        if !self.schema_dir.is_dir() {
            return Err(StorageError::SchemaDirMissing {
                path: self.schema_dir.clone(),
            });
        }
        let mut schema_files: Vec<PathBuf> = fs::read_dir(&self.schema_dir)
            .map_err(|e| StorageError::io(e, "read schema directory", self.schema_dir.clone()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "sql"))
            .collect();
        schema_files.sort();

        for file in &schema_files {
            let sql = fs::read_to_string(file)
                .map_err(|e| StorageError::io(e, "read schema file", file.clone()))?;
            conn.execute_batch(&sql)
                .map_err(|source| StorageError::SchemaApply {
                    file: file.clone(),
                    source,
                })?;
            log::info!("applied schema file {}", file.display());
        }
        if schema_files.is_empty() {
            log::warn!("schema directory {} holds no .sql files", self.schema_dir.display());
        }
        Ok(conn)
    }
}

impl Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("database_path", &self.database_path)
            .field("schema_dir", &self.schema_dir)
            .finish()
    }
}

#[async_trait]
impl KernelComponent for StorageManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        let conn = self.open_and_migrate()?;
        log::info!("database ready at {}", self.database_path.display());
        *self
            .connection
            .lock()
            .map_err(|_| StorageError::LockPoisoned)? = Some(Arc::new(Mutex::new(conn)));
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        // Dropping the last handle closes the connection; module instances
        // are gone by the time shutdown runs in reverse order.
        self.connection
            .lock()
            .map_err(|_| StorageError::LockPoisoned)?
            .take();
        Ok(())
    }
}

/// Application name
pub const APP_NAME: &str = "Defter";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description shown by the about action
pub const APP_DESCRIPTION: &str = "Integrated business-management suite";

/// Per-user directory name under the platform data/config roots
pub const APP_DIR_NAME: &str = "defter";

/// Shell configuration file name (TOML)
pub const CONFIG_FILE_NAME: &str = "defter.toml";

/// Append-only log sink file name
pub const LOG_FILE_NAME: &str = "defter.log";

/// SQLite database file name
pub const DATABASE_FILE_NAME: &str = "defter.db";

/// Environment variable overriding the bundled asset root
pub const ASSETS_ENV_VAR: &str = "DEFTER_ASSETS";

/// Default asset root, relative to the working directory
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Storage-layer asset directory (SQL schema files)
pub const SCHEMA_DIR: &str = "schema";

/// UI-layer asset directory (theme files)
pub const UI_DIR: &str = "ui";

/// Shared-utility asset directory (report templates)
pub const SHARED_DIR: &str = "shared";

/// Localization asset directory
pub const LOCALE_DIR: &str = "locale";

/// Default localization bundle inside the locale directory
pub const DEFAULT_LOCALE_BUNDLE: &str = "en.toml";

/// Process exit status for a clean operator-initiated close
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit status for any fatal startup failure or uncaught fault
pub const EXIT_FAILURE: i32 = 1;

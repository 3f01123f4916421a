//! Capability battery: runtime facilities every business module assumes are
//! present. Each capability is probed independently and reported by name and
//! purpose; a single missing capability halts startup, deliberately
//! all-or-nothing rather than best-effort.

use std::fs;
use std::io;

use crossterm::tty::IsTty;

use crate::kernel::constants;
use crate::preflight::{CheckResult, PreflightCheck, PreflightContext};

/// The terminal the shell renders into.
struct TerminalBackendCheck;

impl PreflightCheck for TerminalBackendCheck {
    fn id(&self) -> &str {
        "capability:terminal-backend"
    }

    fn name(&self) -> &str {
        "terminal-backend"
    }

    fn purpose(&self) -> &str {
        "interactive terminal that renders the tabbed shell"
    }

    fn run(&self, _ctx: &PreflightContext) -> CheckResult {
        if io::stdout().is_tty() && io::stdin().is_tty() {
            Ok("interactive terminal available".to_string())
        } else {
            Err("stdout is not an interactive terminal".to_string())
        }
    }
}

/// The SQLite driver behind persistent storage.
struct StorageDriverCheck;

impl PreflightCheck for StorageDriverCheck {
    fn id(&self) -> &str {
        "capability:storage-driver"
    }

    fn name(&self) -> &str {
        "storage-driver"
    }

    fn purpose(&self) -> &str {
        "SQLite driver backing persistent storage for all modules"
    }

    fn run(&self, _ctx: &PreflightContext) -> CheckResult {
        let probe = || -> rusqlite::Result<String> {
            let conn = rusqlite::Connection::open_in_memory()?;
            conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0))
        };
        match probe() {
            Ok(version) => Ok(format!("sqlite {} available", version)),
            Err(e) => Err(format!("sqlite driver unavailable: {}", e)),
        }
    }
}

/// Per-user data and config directories.
struct UserDirsCheck;

impl PreflightCheck for UserDirsCheck {
    fn id(&self) -> &str {
        "capability:user-dirs"
    }

    fn name(&self) -> &str {
        "user-dirs"
    }

    fn purpose(&self) -> &str {
        "per-user directories locating the log sink and configuration"
    }

    fn run(&self, _ctx: &PreflightContext) -> CheckResult {
        match (dirs::data_dir(), dirs::config_dir()) {
            (Some(data), Some(config)) => Ok(format!(
                "data dir {} / config dir {}",
                data.display(),
                config.display()
            )),
            _ => Err("per-user data or config directory cannot be resolved".to_string()),
        }
    }
}

/// The default localization bundle must load.
struct LocaleBundleCheck;

impl PreflightCheck for LocaleBundleCheck {
    fn id(&self) -> &str {
        "capability:locale-bundle"
    }

    fn name(&self) -> &str {
        "locale-bundle"
    }

    fn purpose(&self) -> &str {
        "default language bundle for shell and module labels"
    }

    fn run(&self, ctx: &PreflightContext) -> CheckResult {
        let path = ctx
            .asset_root()
            .join(constants::LOCALE_DIR)
            .join(constants::DEFAULT_LOCALE_BUNDLE);
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        raw.parse::<toml::Table>()
            .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?;
        Ok(format!("bundle loaded: {}", path.display()))
    }
}

/// The fixed set of mandatory runtime capabilities, in report order.
pub fn capability_checks() -> Vec<Box<dyn PreflightCheck>> {
    vec![
        Box::new(TerminalBackendCheck),
        Box::new(StorageDriverCheck),
        Box::new(UserDirsCheck),
        Box::new(LocaleBundleCheck),
    ]
}

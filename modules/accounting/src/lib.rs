//! Accounting module: chart of accounts and the journal.
//!
//! Construction owns this module's tables; it never touches — or assumes —
//! the tables of any other module.

use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "accounting";

const TABLES: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS journal_entries (
    id INTEGER PRIMARY KEY,
    account_id INTEGER NOT NULL REFERENCES accounts(id),
    entry_date TEXT NOT NULL,
    amount_cents INTEGER NOT NULL,
    memo TEXT
);
";

#[derive(Debug)]
pub struct AccountingModule {
    account_count: i64,
    entry_count: i64,
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "Accounting",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let (account_count, entry_count) = ctx.with_connection(MODULE_ID, |conn| {
        conn.execute_batch(TABLES)?;
        let accounts: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0))?;
        let entries: i64 =
            conn.query_row("SELECT count(*) FROM journal_entries", [], |r| r.get(0))?;
        Ok((accounts, entries))
    })?;
    log::info!(
        "accounting ready: {} accounts, {} journal entries",
        account_count,
        entry_count
    );

    Ok(Box::new(AccountingModule {
        account_count,
        entry_count,
    }))
}

impl BusinessModule for AccountingModule {
    fn body_lines(&self) -> Vec<String> {
        vec![
            format!("Chart of accounts: {} accounts", self.account_count),
            format!("Journal entries: {}", self.entry_count),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use super::*;

    fn memory_ctx() -> ModuleContext {
        let conn = Connection::open_in_memory().unwrap();
        ModuleContext::new(Arc::new(Mutex::new(conn)), PathBuf::from("."))
    }

    #[test]
    fn construction_creates_tables_and_counts_rows() {
        let ctx = memory_ctx();
        let module = construct(&ctx).expect("accounting constructs");

        let lines = module.body_lines();
        assert_eq!(lines[0], "Chart of accounts: 0 accounts");
        assert_eq!(lines[1], "Journal entries: 0");

        // The tables exist afterwards.
        let tables: i64 = ctx
            .with_connection(MODULE_ID, |conn| {
                conn.query_row(
                    "SELECT count(*) FROM sqlite_master \
                     WHERE name IN ('accounts', 'journal_entries')",
                    [],
                    |r| r.get(0),
                )
            })
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn construction_is_idempotent() {
        let ctx = memory_ctx();
        construct(&ctx).unwrap();
        construct(&ctx).expect("second construction over existing tables");
    }
}

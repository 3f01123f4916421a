//! Contacts module: customers and suppliers.

use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "contacts";

const TABLES: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('customer', 'supplier')),
    phone TEXT,
    email TEXT
);
";

#[derive(Debug)]
pub struct ContactsModule {
    customers: i64,
    suppliers: i64,
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "Contacts",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let (customers, suppliers) = ctx.with_connection(MODULE_ID, |conn| {
        conn.execute_batch(TABLES)?;
        let customers: i64 = conn.query_row(
            "SELECT count(*) FROM contacts WHERE kind = 'customer'",
            [],
            |r| r.get(0),
        )?;
        let suppliers: i64 = conn.query_row(
            "SELECT count(*) FROM contacts WHERE kind = 'supplier'",
            [],
            |r| r.get(0),
        )?;
        Ok((customers, suppliers))
    })?;
    log::info!("contacts ready: {} customers, {} suppliers", customers, suppliers);

    Ok(Box::new(ContactsModule {
        customers,
        suppliers,
    }))
}

impl BusinessModule for ContactsModule {
    fn body_lines(&self) -> Vec<String> {
        vec![
            format!("Customers: {}", self.customers),
            format!("Suppliers: {}", self.suppliers),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use super::*;

    #[test]
    fn construction_splits_contacts_by_kind() {
        let conn = Connection::open_in_memory().unwrap();
        let ctx = ModuleContext::new(Arc::new(Mutex::new(conn)), PathBuf::from("."));
        construct(&ctx).unwrap();

        ctx.with_connection(MODULE_ID, |conn| {
            conn.execute_batch(
                "INSERT INTO contacts (name, kind) VALUES
                     ('Nour Trading', 'customer'),
                     ('Jabal Foods', 'customer'),
                     ('Petra Supplies', 'supplier');",
            )
        })
        .unwrap();

        let module = construct(&ctx).unwrap();
        let lines = module.body_lines();
        assert_eq!(lines[0], "Customers: 2");
        assert_eq!(lines[1], "Suppliers: 1");
    }
}

//! Inventory module: items and stock movements.

use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "inventory";

const TABLES: &str = "
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY,
    sku TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT 'pcs'
);
CREATE TABLE IF NOT EXISTS stock_movements (
    id INTEGER PRIMARY KEY,
    item_id INTEGER NOT NULL REFERENCES items(id),
    moved_at TEXT NOT NULL,
    quantity INTEGER NOT NULL
);
";

#[derive(Debug)]
pub struct InventoryModule {
    item_count: i64,
    on_hand: i64,
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "Inventory",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let (item_count, on_hand) = ctx.with_connection(MODULE_ID, |conn| {
        conn.execute_batch(TABLES)?;
        let items: i64 = conn.query_row("SELECT count(*) FROM items", [], |r| r.get(0))?;
        let on_hand: i64 = conn.query_row(
            "SELECT coalesce(sum(quantity), 0) FROM stock_movements",
            [],
            |r| r.get(0),
        )?;
        Ok((items, on_hand))
    })?;
    log::info!("inventory ready: {} items, {} units on hand", item_count, on_hand);

    Ok(Box::new(InventoryModule { item_count, on_hand }))
}

impl BusinessModule for InventoryModule {
    fn body_lines(&self) -> Vec<String> {
        vec![
            format!("Catalogued items: {}", self.item_count),
            format!("Units on hand: {}", self.on_hand),
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
    fn construction_aggregates_stock_movements() {
        let conn = Connection::open_in_memory().unwrap();
        let ctx = ModuleContext::new(Arc::new(Mutex::new(conn)), PathBuf::from("."));
        construct(&ctx).unwrap();

        ctx.with_connection(MODULE_ID, |conn| {
            conn.execute_batch(
                "INSERT INTO items (sku, name) VALUES ('A-1', 'Widget');
                 INSERT INTO stock_movements (item_id, moved_at, quantity)
                     VALUES (1, '2024-01-02', 10), (1, '2024-01-03', -4);",
            )
        })
        .unwrap();

        let module = construct(&ctx).expect("reconstruction sees the data");
        let lines = module.body_lines();
        assert_eq!(lines[0], "Catalogued items: 1");
        assert_eq!(lines[1], "Units on hand: 6");
    }
}

//! Dashboard module: the landing tab, summarizing the state of the suite.

use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "dashboard";

#[derive(Debug)]
pub struct DashboardModule {
    lines: Vec<String>,
}

/// Descriptor registered by the shell binary. Registry order decides the
/// tab position, not anything in here.
pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "Dashboard",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let table_count: i64 = ctx.with_connection(MODULE_ID, |conn| {
        conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
    })?;
    log::info!("dashboard ready, storage holds {} tables", table_count);

    Ok(Box::new(DashboardModule {
        lines: vec![
            "Welcome to Defter.".to_string(),
            String::new(),
            format!("Storage tables available: {}", table_count),
            "Pick a tab to open a business area.".to_string(),
        ],
    }))
}

impl BusinessModule for DashboardModule {
    fn body_lines(&self) -> Vec<String> {
        self.lines.clone()
    }
}

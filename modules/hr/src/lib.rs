//! Human-resources module: employees and payroll runs.

use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "hr";

const TABLES: &str = "
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    full_name TEXT NOT NULL,
    hired_on TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1
);
CREATE TABLE IF NOT EXISTS payroll_runs (
    id INTEGER PRIMARY KEY,
    period TEXT NOT NULL,
    executed_at TEXT NOT NULL
);
";

#[derive(Debug)]
pub struct HrModule {
    active_employees: i64,
    payroll_runs: i64,
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "HR",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let (active_employees, payroll_runs) = ctx.with_connection(MODULE_ID, |conn| {
        conn.execute_batch(TABLES)?;
        let active: i64 =
            conn.query_row("SELECT count(*) FROM employees WHERE active = 1", [], |r| {
                r.get(0)
            })?;
        let runs: i64 = conn.query_row("SELECT count(*) FROM payroll_runs", [], |r| r.get(0))?;
        Ok((active, runs))
    })?;
    log::info!("hr ready: {} active employees", active_employees);

    Ok(Box::new(HrModule {
        active_employees,
        payroll_runs,
    }))
}

impl BusinessModule for HrModule {
    fn body_lines(&self) -> Vec<String> {
        vec![
            format!("Active employees: {}", self.active_employees),
            format!("Payroll runs on record: {}", self.payroll_runs),
        ]
    }
}

//! Reports module: exposes the bundled report templates.
//!
//! Report generation itself belongs to this module's own screens; at
//! composition time it only enumerates the templates shipped under the
//! shared-utility asset directory.

use std::fs;

use defter_core::kernel::constants::SHARED_DIR;
use defter_core::module_system::{
    BusinessModule, ModuleContext, ModuleDescriptor, ModuleSystemError,
};

const MODULE_ID: &str = "reports";
const TEMPLATE_EXTENSION: &str = "tmpl";

#[derive(Debug)]
pub struct ReportsModule {
    templates: Vec<String>,
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor {
        id: MODULE_ID,
        label: "Reports",
        constructor: construct,
    }
}

fn construct(ctx: &ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError> {
    let shared_dir = ctx.asset_root().join(SHARED_DIR);
    let entries =
        fs::read_dir(&shared_dir).map_err(|e| ModuleSystemError::construction(MODULE_ID, e))?;

    let mut templates: Vec<String> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == TEMPLATE_EXTENSION)
        })
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    templates.sort();
    log::info!("reports ready: {} templates found", templates.len());

    Ok(Box::new(ReportsModule { templates }))
}

impl BusinessModule for ReportsModule {
    fn body_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Report templates available: {}", self.templates.len())];
        lines.extend(self.templates.iter().map(|name| format!("  - {}", name)));
        lines
    }
}

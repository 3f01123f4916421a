//! Required-path battery: the bundled asset layout every layer of the
//! application depends on. Each required sub-path gets its own check so the
//! report names exactly what is missing.

use crate::kernel::constants;
use crate::preflight::{CheckResult, PreflightCheck, PreflightContext};

/// Checks that one required asset sub-directory exists.
struct RequiredPathCheck {
    id: &'static str,
    name: &'static str,
    purpose: &'static str,
    sub_path: &'static str,
}

impl PreflightCheck for RequiredPathCheck {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn purpose(&self) -> &str {
        self.purpose
    }

    fn run(&self, ctx: &PreflightContext) -> CheckResult {
        let path = ctx.asset_root().join(self.sub_path);
        if path.is_dir() {
            Ok(format!("directory present: {}", path.display()))
        } else {
            Err(format!("required directory missing: {}", path.display()))
        }
    }
}

/// The fixed set of required sub-paths, in report order.
pub fn required_path_checks() -> Vec<Box<dyn PreflightCheck>> {
    vec![
        Box::new(RequiredPathCheck {
            id: "paths:schema",
            name: "storage layer assets",
            purpose: "SQL schema applied during storage initialization",
            sub_path: constants::SCHEMA_DIR,
        }),
        Box::new(RequiredPathCheck {
            id: "paths:ui",
            name: "UI layer assets",
            purpose: "theme definitions for the shell",
            sub_path: constants::UI_DIR,
        }),
        Box::new(RequiredPathCheck {
            id: "paths:shared",
            name: "shared-utility assets",
            purpose: "report templates shared across modules",
            sub_path: constants::SHARED_DIR,
        }),
        Box::new(RequiredPathCheck {
            id: "paths:locale",
            name: "localization assets",
            purpose: "language bundles for shell and module labels",
            sub_path: constants::LOCALE_DIR,
        }),
    ]
}

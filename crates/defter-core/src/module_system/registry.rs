use std::fmt;

use crate::module_system::error::ModuleSystemError;
use crate::module_system::traits::{BusinessModule, ModuleContext};

/// Constructor reference carried by a descriptor. Construction is assumed
/// side-effect-bearing (it may touch storage) and may fail.
pub type ModuleConstructor =
    fn(&ModuleContext) -> Result<Box<dyn BusinessModule>, ModuleSystemError>;

/// Compile-time description of one business module.
#[derive(Clone)]
pub struct ModuleDescriptor {
    /// Stable identifier, e.g. `accounting`.
    pub id: &'static str,
    /// Label shown on the module's tab.
    pub label: &'static str,
    /// Constructor invoked exactly once during shell assembly.
    pub constructor: ModuleConstructor,
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// Ordered registry of module descriptors.
///
/// Registration order determines tab position and must be stable across
/// runs; the registry never reorders or skips entries.
#[derive(Default)]
pub struct ModuleRegistry {
    descriptors: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor, rejecting duplicate ids.
    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Result<(), ModuleSystemError> {
        if self.descriptors.iter().any(|d| d.id == descriptor.id) {
            return Err(ModuleSystemError::DuplicateId {
                id: descriptor.id.to_string(),
            });
        }
        log::info!("registered module '{}'", descriptor.id);
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Construct every registered module exactly once, in registry order.
    ///
    /// The first constructor failure aborts the whole sequence: a partial
    /// shell with silently missing tabs is never presented.
    pub fn instantiate_all(
        &self,
        ctx: &ModuleContext,
    ) -> Result<Vec<(String, Box<dyn BusinessModule>)>, ModuleSystemError> {
        let mut instances = Vec::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            log::info!("constructing module '{}'", descriptor.id);
            let module = (descriptor.constructor)(ctx)?;
            instances.push((descriptor.label.to_string(), module));
        }
        Ok(instances)
    }
}

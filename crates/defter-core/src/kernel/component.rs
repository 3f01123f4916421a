use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::error::Result;

/// Lifecycle trait for the infrastructure components owned by the kernel.
///
/// Components are initialized in a fixed order during startup, started once
/// initialization completed for all of them, and stopped in reverse order at
/// shutdown. Every method may fail; any failure during startup is fatal.
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

/// Registry of component instances, keyed by their concrete type.
///
/// Ordering is not a concern of the registry itself: the kernel keeps an
/// explicit init-order vector of `TypeId`s alongside it.
#[derive(Default, Debug)]
pub struct ComponentRegistry {
    instances: HashMap<TypeId, Arc<dyn KernelComponent>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component instance under the `TypeId` of its concrete type.
    pub fn register_instance<C>(&mut self, instance: Arc<C>)
    where
        C: KernelComponent + 'static,
    {
        self.instances.insert(TypeId::of::<C>(), instance);
    }

    /// Look up a component as a trait object by concrete `TypeId`.
    pub fn get_by_id(&self, type_id: &TypeId) -> Option<Arc<dyn KernelComponent>> {
        self.instances.get(type_id).cloned()
    }

    /// Look up a component by concrete type, downcasting the stored Arc.
    pub fn get_concrete<C: KernelComponent + 'static>(&self) -> Option<Arc<C>> {
        self.instances.get(&TypeId::of::<C>()).and_then(|component| {
            let as_any: Arc<dyn Any + Send + Sync> = component.clone();
            Arc::downcast::<C>(as_any).ok()
        })
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

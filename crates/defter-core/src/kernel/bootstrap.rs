//! Application bootstrap and run loop driver.
//!
//! One orchestration path: infrastructure components initialize in a fixed
//! order, business modules are constructed strictly afterwards, the shell is
//! composed from them, and the run loop blocks until the operator closes it.
//! Startup is sequential: it either completes fully or aborts the process.

use std::any::TypeId;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::kernel::component::{ComponentRegistry, KernelComponent};
use crate::kernel::constants;
use crate::kernel::error::{Error, LifecyclePhase, Result};
use crate::module_system::{BusinessModule, ModuleContext, ModuleRegistry};
use crate::preflight::{CheckOutcome, StartupReport};
use crate::shell::{Shell, ShellFrontend, ShellState};
use crate::storage::StorageManager;
use crate::storage::config::ShellConfig;

/// Coordinates infrastructure components and module composition.
pub struct Application {
    initialized: bool,
    dependencies: Arc<Mutex<ComponentRegistry>>,
    component_init_order: Vec<TypeId>,
    module_registry: ModuleRegistry,
    shell_config: ShellConfig,
    asset_root: PathBuf,
}

impl Application {
    /// Create the application with its default components. Nothing is
    /// initialized yet; `run` performs the ordered startup.
    pub fn new(asset_root: PathBuf, data_dir: PathBuf, shell_config: ShellConfig) -> Self {
        log::info!("bootstrapping {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let mut registry = ComponentRegistry::new();
        let mut init_order = Vec::new();

        let storage = Arc::new(StorageManager::new(
            data_dir,
            asset_root.join(constants::SCHEMA_DIR),
        ));
        registry.register_instance(storage);
        init_order.push(TypeId::of::<StorageManager>());

        Self {
            initialized: false,
            dependencies: Arc::new(Mutex::new(registry)),
            component_init_order: init_order,
            module_registry: ModuleRegistry::new(),
            shell_config,
            asset_root,
        }
    }

    /// Look up a component instance by its concrete type.
    pub async fn get_component<C: KernelComponent + 'static>(&self) -> Option<Arc<C>> {
        self.dependencies.lock().await.get_concrete::<C>()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn module_registry(&self) -> &ModuleRegistry {
        &self.module_registry
    }

    /// Mutable access for static module registration before `run`.
    pub fn module_registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.module_registry
    }

    /// Perform the ordered startup, drive the shell until the operator
    /// closes it, then shut down. Returns the process exit status.
    pub async fn run(
        &mut self,
        frontend: &mut dyn ShellFrontend,
        report: &mut StartupReport,
    ) -> Result<i32> {
        if self.initialized {
            return Err(Error::KernelLifecycle {
                phase: LifecyclePhase::RunPreCheck,
                component: None,
                message: "application already initialized".to_string(),
                source: None,
            });
        }

        self.initialize(report).await?;
        self.start().await?;

        // Modules are constructed only after every component, storage
        // included, initialized successfully.
        let modules = self.instantiate_modules(report).await?;
        let shell = Shell::compose(&self.shell_config, modules);
        self.initialized = true;
        log::info!(
            "shell assembled: {} tabs, frontend '{}'",
            shell.tab_count(),
            frontend.name()
        );

        let status = run_shell(frontend, &shell);

        self.shutdown().await?;
        status
    }

    /// Initialize all registered components in the predefined order.
    async fn initialize(&mut self, report: &mut StartupReport) -> Result<()> {
        let registry = self.dependencies.lock().await;
        for type_id in &self.component_init_order {
            let component = registry.get_by_id(type_id).ok_or_else(|| Error::KernelLifecycle {
                phase: LifecyclePhase::Initialize,
                component: None,
                message: format!("component instance missing from registry: {:?}", type_id),
                source: None,
            })?;
            let check = format!("init:{}", component.name());
            match component.initialize().await {
                Ok(()) => report.record(&check, CheckOutcome::Passed, "initialized"),
                Err(e) => {
                    report.record(&check, CheckOutcome::Failed, e.to_string());
                    return Err(Error::KernelLifecycle {
                        phase: LifecyclePhase::Initialize,
                        component: Some(component.name().to_string()),
                        message: "component failed to initialize".to_string(),
                        source: Some(Box::new(e)),
                    });
                }
            }
        }
        Ok(())
    }

    /// Start all initialized components in the predefined order.
    async fn start(&mut self) -> Result<()> {
        let registry = self.dependencies.lock().await;
        for type_id in &self.component_init_order {
            if let Some(component) = registry.get_by_id(type_id) {
                component.start().await.map_err(|e| Error::KernelLifecycle {
                    phase: LifecyclePhase::Start,
                    component: Some(component.name().to_string()),
                    message: "component failed to start".to_string(),
                    source: Some(Box::new(e)),
                })?;
            }
        }
        Ok(())
    }

    /// Shut down all components in reverse initialization order.
    async fn shutdown(&mut self) -> Result<()> {
        let registry = self.dependencies.lock().await;
        for type_id in self.component_init_order.iter().rev() {
            if let Some(component) = registry.get_by_id(type_id) {
                if let Err(e) = component.stop().await {
                    log::error!("error stopping component {}: {}", component.name(), e);
                    return Err(Error::KernelLifecycle {
                        phase: LifecyclePhase::Shutdown,
                        component: Some(component.name().to_string()),
                        message: "component failed to stop".to_string(),
                        source: Some(Box::new(e)),
                    });
                }
            }
        }
        // The initialized flag stays set: storage initialization runs once
        // per process start, so an Application instance never runs twice.
        Ok(())
    }

    /// Construct every registered module in registry order.
    async fn instantiate_modules(
        &self,
        report: &mut StartupReport,
    ) -> Result<Vec<(String, Box<dyn BusinessModule>)>> {
        let storage = self
            .get_component::<StorageManager>()
            .await
            .ok_or_else(|| Error::KernelLifecycle {
                phase: LifecyclePhase::Bootstrap,
                component: Some("StorageManager".to_string()),
                message: "storage component missing during module construction".to_string(),
                source: None,
            })?;
        let ctx = ModuleContext::new(storage.connection()?, self.asset_root.clone());
        match self.module_registry.instantiate_all(&ctx) {
            Ok(modules) => {
                report.record(
                    "modules:instantiate",
                    CheckOutcome::Passed,
                    format!("{} modules constructed in registry order", modules.len()),
                );
                Ok(modules)
            }
            Err(e) => {
                report.record("modules:instantiate", CheckOutcome::Failed, e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Run loop driver: blocks until the operator closes the shell, returning
/// the exit status of the loop. The frontend is finalized on every path;
/// any panic below this point is taken by the installed fault interceptor.
fn run_shell(frontend: &mut dyn ShellFrontend, shell: &Shell) -> Result<i32> {
    frontend.initialize(shell)?;
    let mut state = ShellState::new();
    let outcome = drive(frontend, shell, &mut state);
    if let Err(e) = frontend.finalize() {
        log::error!("frontend finalization failed: {}", e);
        // Keep the original outcome; a teardown failure must not mask it.
    }
    outcome
}

fn drive(
    frontend: &mut dyn ShellFrontend,
    shell: &Shell,
    state: &mut ShellState,
) -> Result<i32> {
    loop {
        frontend.render(shell, state)?;
        let action = frontend.poll_action()?;
        if state.apply(action, shell.tab_count()) {
            log::info!("operator closed the shell");
            return Ok(constants::EXIT_SUCCESS);
        }
    }
}

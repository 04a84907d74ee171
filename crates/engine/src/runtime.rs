//! Host runtime surface
//!
//! The host bridge builds a [`HostRuntime`] describing the host's method
//! tables, the extension modules it loaded and its live components, then
//! installs it with [`crate::init_host`].

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use rhud_sdk::Vector2;

use crate::error::HostError;
use crate::host_type::HostType;
use crate::module::LoadedModule;
use crate::reflect::ObjectRef;

/// Everything the interception layer can see of the host
pub struct HostRuntime {
    /// Method tables keyed by type name
    types: DashMap<String, Arc<HostType>>,

    /// Extension modules in load order
    modules: RwLock<Vec<Arc<LoadedModule>>>,

    /// Currently active component instances
    components: RwLock<Vec<ObjectRef>>,

    /// Size of the main UI root, used as the layout reference dimension
    ui_root_size: RwLock<Vector2>,
}

impl Default for HostRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRuntime {
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
            modules: RwLock::new(Vec::new()),
            components: RwLock::new(Vec::new()),
            ui_root_size: RwLock::new(Vector2::ZERO),
        }
    }

    /// Register a host type's method table
    pub fn register_type(&self, ty: HostType) -> Arc<HostType> {
        let ty = Arc::new(ty);
        if self
            .types
            .insert(ty.name().to_string(), Arc::clone(&ty))
            .is_some()
        {
            tracing::warn!("Host type '{}' registered twice, replacing", ty.name());
        } else {
            tracing::debug!("Registered host type '{}'", ty.name());
        }
        ty
    }

    /// Look up a host type by name
    pub fn host_type(&self, name: &str) -> Option<Arc<HostType>> {
        self.types.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Dispatch `type_name::method` on `receiver`
    pub fn invoke<S, A, R>(
        &self,
        type_name: &str,
        method: &str,
        receiver: &mut S,
        args: A,
    ) -> Result<R, HostError>
    where
        S: 'static,
        A: 'static,
        R: 'static,
    {
        // Clone the Arc so no map shard stays locked while the body runs
        let ty = self
            .host_type(type_name)
            .ok_or_else(|| HostError::TypeNotFound(type_name.to_string()))?;
        ty.invoke(method, receiver, args)
    }

    /// Record a newly loaded extension module
    pub fn load_module(&self, module: LoadedModule) {
        tracing::debug!("Module loaded: {}", module.name());
        self.modules.write().push(Arc::new(module));
    }

    /// Snapshot of the loaded modules
    pub fn loaded_modules(&self) -> Vec<Arc<LoadedModule>> {
        self.modules.read().clone()
    }

    /// Register a live component instance
    pub fn spawn_component(&self, component: ObjectRef) {
        tracing::trace!("Component spawned: {}", component.type_name());
        self.components.write().push(component);
    }

    /// Snapshot of the active component instances
    pub fn active_components(&self) -> Vec<ObjectRef> {
        self.components.read().clone()
    }

    pub fn ui_root_size(&self) -> Vector2 {
        *self.ui_root_size.read()
    }

    pub fn set_ui_root_size(&self, size: Vector2) {
        *self.ui_root_size.write() = size;
    }
}

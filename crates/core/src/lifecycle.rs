//! Two-phase startup
//!
//! The host calls `Init` while loading mods, before any hooked method can
//! fire, and `PostInit` once every mod finished its own initialization.

use std::sync::Arc;

use rhud_engine::HostRuntime;

use crate::config::CoreConfig;
use crate::hooks::{HookError, HookRegistry};
use crate::hud::HudController;
use crate::interceptions;
use crate::interop::{LayoutPatcher, PatchOutcome};

/// Lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// A required hook could not be installed
    #[error("Hook installation failed: {0}")]
    Hooks(#[from] HookError),

    #[error("Init already ran")]
    AlreadyInitialized,

    #[error("PostInit called before Init")]
    NotInitialized,
}

/// The mod: hooks, HUD collaborator and layout patcher
pub struct ReloadedHud {
    config: CoreConfig,
    hud: Arc<dyn HudController>,
    registry: Option<HookRegistry>,
    patcher: LayoutPatcher,
}

impl ReloadedHud {
    pub fn new(config: CoreConfig, hud: Arc<dyn HudController>) -> Self {
        let patcher = LayoutPatcher::new(config.layout.clone());
        Self {
            config,
            hud,
            registry: None,
            patcher,
        }
    }

    /// Install every hook
    ///
    /// A failure here is fatal: the HUD can't work without its hooks.
    pub fn init(&mut self, host: &HostRuntime) -> Result<(), LifecycleError> {
        if self.registry.is_some() {
            return Err(LifecycleError::AlreadyInitialized);
        }

        let registry = interceptions::install_all(host, Arc::clone(&self.hud))?;
        self.registry = Some(registry);
        Ok(())
    }

    /// Patch the foreign layout against the host's UI root size
    ///
    /// Foreign problems never surface as errors, only in the outcome and logs.
    pub fn post_init(&self, host: &HostRuntime) -> Result<PatchOutcome, LifecycleError> {
        if self.registry.is_none() {
            return Err(LifecycleError::NotInitialized);
        }

        Ok(self
            .patcher
            .patch_foreign_layout(host, host.ui_root_size()))
    }

    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    pub fn hooks(&self) -> Option<&HookRegistry> {
        self.registry.as_ref()
    }

    pub fn hud(&self) -> &Arc<dyn HudController> {
        &self.hud
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }
}

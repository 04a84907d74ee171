//! Global plugin state
//!
//! Set once by a successful `Init`. The HUD state handle stays reachable so
//! the renderer can subscribe to fade and edit-mode changes.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use rhud_core::{CoreConfig, HudState, LifecycleError, PatchOutcome, ReloadedHud};
use rhud_engine::HostRuntime;

/// Errors reported across the FFI boundary
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Host runtime not installed")]
    HostMissing,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

struct PluginState {
    hud: Arc<HudState>,
    reloaded_hud: Mutex<ReloadedHud>,
}

static PLUGIN: OnceLock<PluginState> = OnceLock::new();

/// Run the `Init` phase against `host`
pub fn init(host: &HostRuntime, config: CoreConfig) -> Result<(), PluginError> {
    if PLUGIN.get().is_some() {
        return Err(LifecycleError::AlreadyInitialized.into());
    }

    let hud = Arc::new(HudState::new());
    let mut reloaded_hud = ReloadedHud::new(config, hud.clone());
    reloaded_hud.init(host)?;

    PLUGIN
        .set(PluginState {
            hud,
            reloaded_hud: Mutex::new(reloaded_hud),
        })
        .map_err(|_| LifecycleError::AlreadyInitialized)?;
    Ok(())
}

/// Run the `PostInit` phase against `host`
pub fn post_init(host: &HostRuntime) -> Result<PatchOutcome, PluginError> {
    let plugin = PLUGIN.get().ok_or(LifecycleError::NotInitialized)?;
    let outcome = plugin.reloaded_hud.lock().post_init(host)?;
    Ok(outcome)
}

/// HUD state, once `Init` succeeded
pub fn hud_state() -> Option<Arc<HudState>> {
    PLUGIN.get().map(|p| Arc::clone(&p.hud))
}

//! ReloadedHUD - Core Logic
//!
//! This crate contains the interception layer proper:
//! - [`hooks`] - detour registry with original-call capability
//! - [`interceptions`] - the six HUD hooks on pause, UI and death
//! - [`interop`] - one-shot repositioning of the item tips panel
//! - [`lifecycle`] - the `Init` / `PostInit` startup contract
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Host type definitions and fixed names
//! - [`engine`] - Host runtime surface

pub use rhud_engine as engine;
pub use rhud_sdk as sdk;

pub mod config;
pub mod hooks;
pub mod hud;
pub mod interceptions;
pub mod interop;
pub mod lifecycle;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::{ConfigError, ConfigResult, CoreConfig, LayoutConfig};
pub use hooks::{
    HookDescriptor, HookError, HookKey, HookRegistry, Original, Replacement, ReplacementTable,
    ResolutionError,
};
pub use hud::{FadeLevel, HudController, HudEvent, HudListenerKey, HudState};
pub use interop::{Discovery, InteropError, LayoutPatcher, LayoutPosition, PatchOutcome};
pub use lifecycle::{LifecycleError, ReloadedHud};

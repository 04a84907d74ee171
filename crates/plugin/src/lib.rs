//! ReloadedHUD Plugin - FFI Layer
//!
//! This crate provides the boundary between the host bridge and the Rust
//! core logic. It compiles to a cdylib (.so/.dll).
//!
//! The bridge installs the host runtime with [`rhud_engine::init_host`], then
//! calls `rust_plugin_init` during mod loading and `rust_plugin_post_init`
//! once every mod has loaded.

pub mod ffi;
pub mod logging;
pub mod state;

pub use state::{hud_state, init, post_init, PluginError};

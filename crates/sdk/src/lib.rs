//! ReloadedHUD SDK - Host Type Definitions
//!
//! This crate contains the type definitions shared between the host bridge and
//! the interception layer. It has no dependencies and compiles quickly,
//! allowing parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`math`] - Value types passed through host method signatures
//! - [`host`] - Receiver handles for the host types we intercept
//! - [`names`] - Fixed type, method and member names resolved at runtime

pub mod host;
pub mod math;
pub mod names;

pub use host::*;
pub use math::Vector2;
pub use names::INTERCEPTED_METHODS;

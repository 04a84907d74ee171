//! Cross-module interop
//!
//! Best-effort integration with independently loaded extensions. Lookups are
//! confined to narrow adapters that return a typed accessor or a structured
//! absence; the rest of the crate never sees reflection.

pub mod error;
pub mod item_tips;
pub mod patcher;

use rhud_sdk::Vector2;

pub use error::InteropError;
pub use item_tips::ItemTipsSettings;
pub use patcher::{apply_layout, LayoutPatcher, LayoutPosition, PatchOutcome};

/// Result of looking for an optional extension
#[derive(Debug)]
pub enum Discovery<T> {
    /// Not installed, or not instantiated yet
    Absent,

    Found(T),

    /// Installed but incompatible
    FoundButInvalid(InteropError),
}

impl<T> Discovery<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Discovery::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Discovery::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Layout state read from a foreign settings holder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsSnapshot {
    /// Horizontal position, fraction of the screen width
    pub left: f32,

    /// Vertical position, fraction of the screen height
    pub top: f32,

    /// Rendered size at the requested scale
    pub size: Vector2,
}

/// Typed access to a foreign panel's position settings
pub trait LayoutSettings {
    /// Read position and rendered size at `scale`
    fn snapshot(&self, scale: i32) -> Result<SettingsSnapshot, InteropError>;

    /// Write both position fractions back
    fn write_position(&self, left: f32, top: f32) -> Result<(), InteropError>;
}

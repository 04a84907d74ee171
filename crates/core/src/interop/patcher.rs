//! Foreign layout patch pass
//!
//! Moves the item tips panel flush against the right edge of the reference
//! area, with a small margin, and lowers it under our HUD. Runs once; every
//! failure is logged and swallowed so startup always continues.

use std::sync::atomic::{AtomicBool, Ordering};

use rhud_engine::HostRuntime;
use rhud_sdk::names::item_tips;
use rhud_sdk::Vector2;

use super::{item_tips as adapter, Discovery, InteropError, LayoutSettings};
use crate::config::LayoutConfig;

/// Position written back to the foreign settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPosition {
    pub left: f32,
    pub top: f32,
}

/// What a patch pass did
#[derive(Debug)]
pub enum PatchOutcome {
    /// Disabled by configuration
    Disabled,

    /// A previous pass already ran
    AlreadyRan,

    /// Extension not installed or not instantiated
    Skipped,

    Patched(LayoutPosition),

    /// Extension present but incompatible, already logged
    Failed(InteropError),
}

impl PatchOutcome {
    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched(_))
    }
}

/// Read the size, compute the new position and write it back once
///
/// `left = right_edge - size.x / reference.x`, `top` is fixed.
pub fn apply_layout<L>(
    settings: &L,
    reference: Vector2,
    config: &LayoutConfig,
) -> Result<LayoutPosition, InteropError>
where
    L: LayoutSettings + ?Sized,
{
    if !reference.x.is_finite() || reference.x <= 0.0 {
        return Err(InteropError::InvalidReference(reference.x));
    }

    let snapshot = settings.snapshot(config.size_scale)?;
    if !snapshot.size.x.is_finite() {
        return Err(InteropError::InvalidSize(snapshot.size.x));
    }

    let position = LayoutPosition {
        left: config.right_edge - snapshot.size.x / reference.x,
        top: config.top,
    };

    settings.write_position(position.left, position.top)?;

    tracing::debug!(
        "Moved panel from ({}, {}) to ({}, {}), width {} of {}",
        snapshot.left,
        snapshot.top,
        position.left,
        position.top,
        snapshot.size.x,
        reference.x
    );
    Ok(position)
}

/// One-shot patcher for the item tips panel
pub struct LayoutPatcher {
    config: LayoutConfig,
    ran: AtomicBool,
}

impl LayoutPatcher {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ran: AtomicBool::new(false),
        }
    }

    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }

    /// Run the patch pass against `host`
    ///
    /// Only the first call does anything. Never fails: a missing extension is
    /// skipped quietly, an incompatible one is logged.
    pub fn patch_foreign_layout(&self, host: &HostRuntime, reference: Vector2) -> PatchOutcome {
        if self.ran.swap(true, Ordering::SeqCst) {
            tracing::debug!("Layout patch already ran");
            return PatchOutcome::AlreadyRan;
        }

        if !self.config.enabled {
            tracing::info!("Layout patch disabled");
            return PatchOutcome::Disabled;
        }

        let settings = match adapter::locate(host) {
            Discovery::Absent => {
                tracing::debug!("{} not active, layout untouched", item_tips::MODULE);
                return PatchOutcome::Skipped;
            }
            Discovery::FoundButInvalid(e) => return Self::failed(e),
            Discovery::Found(settings) => settings,
        };

        match apply_layout(&settings, reference, &self.config) {
            Ok(position) => {
                tracing::info!(
                    "Repositioned {} panel to left={:.3} top={:.3}",
                    item_tips::MODULE,
                    position.left,
                    position.top
                );
                PatchOutcome::Patched(position)
            }
            Err(e) => Self::failed(e),
        }
    }

    fn failed(e: InteropError) -> PatchOutcome {
        tracing::error!(error = ?e, "Error interacting with {}: {}", item_tips::MODULE, e);
        PatchOutcome::Failed(e)
    }
}

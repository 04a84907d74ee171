//! HUD visual state
//!
//! The interceptions only ever talk to a [`HudController`]. [`HudState`] is the
//! stock implementation: it keeps the requested fade levels and the edit-mode
//! flag, and forwards every change to listeners so the renderer can animate.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

/// Target opacity of a fade
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeLevel {
    Hidden = 0,
    Visible = 1,
}

impl FadeLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(value: u8) -> Self {
        if value == 0 {
            FadeLevel::Hidden
        } else {
            FadeLevel::Visible
        }
    }
}

impl From<bool> for FadeLevel {
    fn from(visible: bool) -> Self {
        if visible {
            FadeLevel::Visible
        } else {
            FadeLevel::Hidden
        }
    }
}

/// Visual-state collaborator driven by the interceptions
pub trait HudController: Send + Sync {
    /// Fade the HUD in or out
    fn set_fade_level(&self, level: FadeLevel);

    /// Fade the HUD while the pause menu is shown
    fn set_paused_fade_level(&self, level: FadeLevel);

    fn set_edit_mode(&self, editing: bool);

    fn is_editing(&self) -> bool;
}

/// A change reported to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudEvent {
    Fade(FadeLevel),
    PausedFade(FadeLevel),
    EditMode(bool),
}

new_key_type! {
    /// Key for registered HUD listeners, used for removal
    pub struct HudListenerKey;
}

pub type HudCallback = Box<dyn Fn(HudEvent) + Send + Sync>;

/// Stock [`HudController`]
pub struct HudState {
    editing: AtomicBool,
    fade: AtomicU8,
    paused_fade: AtomicU8,
    listeners: RwLock<SlotMap<HudListenerKey, HudCallback>>,
}

impl Default for HudState {
    fn default() -> Self {
        Self::new()
    }
}

impl HudState {
    /// HUD starts visible and outside edit mode
    pub fn new() -> Self {
        Self {
            editing: AtomicBool::new(false),
            fade: AtomicU8::new(FadeLevel::Visible.as_u8()),
            paused_fade: AtomicU8::new(FadeLevel::Hidden.as_u8()),
            listeners: RwLock::new(SlotMap::with_key()),
        }
    }

    pub fn fade_level(&self) -> FadeLevel {
        FadeLevel::from_u8(self.fade.load(Ordering::SeqCst))
    }

    pub fn paused_fade_level(&self) -> FadeLevel {
        FadeLevel::from_u8(self.paused_fade.load(Ordering::SeqCst))
    }

    /// Register a callback for every HUD change
    pub fn on_change<F>(&self, callback: F) -> HudListenerKey
    where
        F: Fn(HudEvent) + Send + Sync + 'static,
    {
        self.listeners.write().insert(Box::new(callback))
    }

    /// Returns `true` if the listener was found and removed
    pub fn remove_listener(&self, key: HudListenerKey) -> bool {
        self.listeners.write().remove(key).is_some()
    }

    fn fire(&self, event: HudEvent) {
        tracing::trace!("HUD {:?}", event);
        let listeners = self.listeners.read();
        for (_, callback) in listeners.iter() {
            callback(event);
        }
    }
}

impl HudController for HudState {
    fn set_fade_level(&self, level: FadeLevel) {
        self.fade.store(level.as_u8(), Ordering::SeqCst);
        self.fire(HudEvent::Fade(level));
    }

    fn set_paused_fade_level(&self, level: FadeLevel) {
        self.paused_fade.store(level.as_u8(), Ordering::SeqCst);
        self.fire(HudEvent::PausedFade(level));
    }

    fn set_edit_mode(&self, editing: bool) {
        self.editing.store(editing, Ordering::SeqCst);
        self.fire(HudEvent::EditMode(editing));
    }

    fn is_editing(&self) -> bool {
        self.editing.load(Ordering::SeqCst)
    }
}

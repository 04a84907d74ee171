//! Names resolved at runtime
//!
//! These strings must match exactly what the host and the foreign extension
//! expose.

/// Host type owning Pause/Unpause
pub const GAME_MANAGER: &str = "GameManager";

/// Host type owning the pause menu visibility toggle
pub const PAUSE_MENU_CONTROLLER: &str = "PauseMenuController";

/// Host type owning the core HUD show/hide methods
pub const GAME_UI_ROOT: &str = "GameUIRoot";

/// Host type owning the death handler
pub const PLAYER_CONTROLLER: &str = "PlayerController";

pub const PAUSE: &str = "Pause";
pub const UNPAUSE: &str = "Unpause";
pub const TOGGLE_VISIBILITY: &str = "ToggleVisibility";
pub const HIDE_CORE_UI: &str = "HideCoreUI";
pub const SHOW_CORE_UI: &str = "ShowCoreUI";
pub const DIE: &str = "Die";

/// Replacement name for `PauseMenuController::ToggleVisibility`
pub const TOGGLE_PAUSE_MENU_VISIBILITY: &str = "TogglePauseMenuVisibility";

/// Every (type, method, replacement) triple installed at startup.
/// `None` means the replacement shares the method's name.
pub const INTERCEPTED_METHODS: &[(&str, &str, Option<&str>)] = &[
    (GAME_MANAGER, PAUSE, None),
    (GAME_MANAGER, UNPAUSE, None),
    (
        PAUSE_MENU_CONTROLLER,
        TOGGLE_VISIBILITY,
        Some(TOGGLE_PAUSE_MENU_VISIBILITY),
    ),
    (GAME_UI_ROOT, HIDE_CORE_UI, None),
    (GAME_UI_ROOT, SHOW_CORE_UI, None),
    (PLAYER_CONTROLLER, DIE, None),
];

/// Foreign item tips extension
pub mod item_tips {
    /// Module (assembly) name
    pub const MODULE: &str = "ItemTipsMod";

    /// Main component type
    pub const MODULE_TYPE: &str = "ItemTipsMod.ItemTipsModule";

    /// Settings holder type
    pub const SETTINGS_TYPE: &str = "ItemTipsMod.Settings";

    /// Private settings reference on the main component
    pub const CURRENT_SETTINGS_FIELD: &str = "_currentSettings";

    /// Horizontal position as a fraction of the screen (0.01 by default)
    pub const LEFT_FIELD: &str = "Left";

    /// Vertical position as a fraction of the screen (0.20 by default)
    pub const TOP_FIELD: &str = "Top";

    /// Size query, takes an integer scale
    pub const GET_SIZE_METHOD: &str = "GetSize";
}

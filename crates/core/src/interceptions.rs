//! The six HUD interceptions
//!
//! Ordering around the original matters: edit mode is entered before the
//! host's pause logic runs and left only after its unpause logic ran, so the
//! rest of the pause pipeline sees a consistent state.

use std::sync::Arc;

use rhud_engine::HostRuntime;
use rhud_sdk::names::{self, INTERCEPTED_METHODS};
use rhud_sdk::{GameManager, GameUIRoot, PauseMenuController, PlayerController, Vector2};

use crate::hooks::{HookError, HookRegistry, Original, ReplacementTable};
use crate::hud::{FadeLevel, HudController};

/// Build the replacement table, bound to `hud`
pub fn replacements(hud: Arc<dyn HudController>) -> ReplacementTable {
    let pause_hud = Arc::clone(&hud);
    let unpause_hud = Arc::clone(&hud);
    let toggle_hud = Arc::clone(&hud);
    let hide_hud = Arc::clone(&hud);
    let show_hud = Arc::clone(&hud);
    let die_hud = hud;

    ReplacementTable::new()
        .with(
            names::PAUSE,
            move |orig: Original<GameManager, (), ()>, gm: &mut GameManager, args: ()| {
                pause_hud.set_edit_mode(true);
                orig.call(gm, args);
            },
        )
        .with(
            names::UNPAUSE,
            move |orig: Original<GameManager, (), ()>, gm: &mut GameManager, args: ()| {
                orig.call(gm, args);
                unpause_hud.set_edit_mode(false);
            },
        )
        .with(
            names::TOGGLE_PAUSE_MENU_VISIBILITY,
            move |orig: Original<PauseMenuController, bool, ()>,
                  menu: &mut PauseMenuController,
                  visible: bool| {
                toggle_hud.set_paused_fade_level(FadeLevel::from(visible));
                orig.call(menu, visible);
            },
        )
        .with(
            names::HIDE_CORE_UI,
            move |orig: Original<GameUIRoot, String, ()>, root: &mut GameUIRoot, reason: String| {
                if !hide_hud.is_editing() {
                    hide_hud.set_fade_level(FadeLevel::Hidden);
                }
                orig.call(root, reason);
            },
        )
        .with(
            names::SHOW_CORE_UI,
            move |orig: Original<GameUIRoot, String, ()>, root: &mut GameUIRoot, reason: String| {
                if !show_hud.is_editing() {
                    show_hud.set_fade_level(FadeLevel::Visible);
                }
                orig.call(root, reason);
            },
        )
        .with(
            names::DIE,
            move |orig: Original<PlayerController, Vector2, ()>,
                  player: &mut PlayerController,
                  direction: Vector2| {
                die_hud.set_fade_level(FadeLevel::Hidden);
                orig.call(player, direction);
            },
        )
}

/// Install every interception into `host`
///
/// All or nothing: if any target fails to resolve, no detour is installed.
pub fn install_all(
    host: &HostRuntime,
    hud: Arc<dyn HudController>,
) -> Result<HookRegistry, HookError> {
    let mut registry = HookRegistry::new(replacements(hud));

    registry.register_all(host, INTERCEPTED_METHODS)?;

    tracing::info!("Installed {} hooks", registry.len());
    Ok(registry)
}

//! Where ReloadedHUD keeps its files

use std::path::{Path, PathBuf};

use super::{ConfigError, ConfigResult};

/// Overrides the base directory when set
pub const HOME_ENV: &str = "RHUD_HOME";

/// `$RHUD_HOME`, or `Mods/ReloadedHUD` beside the host executable
pub fn rhud_base_dir() -> ConfigResult<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(home.into());
    }

    let exe = std::env::current_exe()?;
    let game_dir = exe.parent().ok_or(ConfigError::NoBaseDirectory)?;
    Ok(game_dir.join("Mods").join("ReloadedHUD"))
}

pub fn configs_dir() -> ConfigResult<PathBuf> {
    rhud_base_dir().map(|base| base.join("configs"))
}

/// `<base>/configs/core.toml`
pub fn core_config_path() -> ConfigResult<PathBuf> {
    rhud_base_dir().map(|base| core_config_path_in(&base))
}

pub fn core_config_path_in(base: &Path) -> PathBuf {
    base.join("configs").join("core.toml")
}

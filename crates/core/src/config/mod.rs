//! ReloadedHUD settings file
//!
//! One TOML file, `<base>/configs/core.toml`. A missing file is written out
//! with defaults on first load; missing keys fall back to their defaults.
//!
//! ```toml
//! version = 1
//! debug = false
//!
//! [layout]
//! enabled = true
//! right_edge = 0.98
//! top = 0.30
//! size_scale = 1
//! ```

mod loader;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use loader::{configs_dir, core_config_path, core_config_path_in, rhud_base_dir, HOME_ENV};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Neither `RHUD_HOME` nor the host executable location is usable
    #[error("No base directory for ReloadedHUD files")]
    NoBaseDirectory,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the item tips panel is moved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Skip the patch pass entirely when false
    pub enabled: bool,

    /// Panel's right edge, fraction of the reference width
    pub right_edge: f32,

    /// Panel's top, fraction of the reference height
    pub top: f32,

    /// Argument handed to the panel's size query
    pub size_scale: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            enabled: true,
            right_edge: 0.98,
            top: 0.30,
            size_scale: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Bumped when the file layout changes
    pub version: u32,

    /// Log at debug level unless `RUST_LOG` says otherwise
    pub debug: bool,

    pub layout: LayoutConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            version: 1,
            debug: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Read `core.toml` from the base directory
    pub fn load() -> ConfigResult<Self> {
        let path = core_config_path()?;
        Self::load_from(&path)
    }

    /// Read `path`, writing the defaults there first if it doesn't exist
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            let config = CoreConfig::default();
            config.save_to(path)?;
            tracing::info!("Wrote default settings to {}", path.display());
            return Ok(config);
        }

        let config = toml::from_str(&fs::read_to_string(path)?)?;
        tracing::debug!("Read settings from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> ConfigResult<()> {
        let path = core_config_path()?;
        self.save_to(&path)
    }

    /// Write to `path`, creating its directory as needed
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Wrote settings to {}", path.display());
        Ok(())
    }

    /// Replace `self` with what's currently on disk
    pub fn reload(&mut self) -> ConfigResult<()> {
        let path = core_config_path()?;
        self.reload_from(&path)
    }

    pub fn reload_from(&mut self, path: &Path) -> ConfigResult<()> {
        *self = toml::from_str(&fs::read_to_string(path)?)?;
        tracing::debug!("Re-read settings from {}", path.display());
        Ok(())
    }
}

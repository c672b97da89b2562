use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Persisted user preferences.
///
/// The serialized key names are part of the on-disk contract; absent keys
/// fall back to their defaults so a partial or missing file always loads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prefs {
    /// Last committed window width, in terminal columns.
    #[serde(rename = "window-width", default = "default_window_width")]
    pub window_width: u16,

    /// Last committed window height, in terminal rows.
    #[serde(rename = "window-height", default = "default_window_height")]
    pub window_height: u16,

    /// Editor font size.
    #[serde(rename = "font-size", default = "default_font_size")]
    pub font_size: u16,

    /// Word wrap on/off.
    #[serde(rename = "wrap-mode", default = "default_wrap_mode")]
    pub wrap_mode: bool,
}

fn default_window_width() -> u16 {
    80
}
fn default_window_height() -> u16 {
    24
}
fn default_font_size() -> u16 {
    12
}
fn default_wrap_mode() -> bool {
    false
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            font_size: default_font_size(),
            wrap_mode: default_wrap_mode(),
        }
    }
}

/// Preference store backed by a JSON file in the user config directory.
///
/// Loaded once at window construction; written on resize-settle, font
/// change, wrap toggle and quit. Writes are last-write-wins with no
/// transactional guarantee.
pub struct PrefStore {
    prefs: Prefs,
    prefs_path: PathBuf,
}

impl PrefStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            prefs: Prefs::default(),
            prefs_path: config_dir.join("prefs.json"),
        }
    }

    /// Read preferences from disk, keeping defaults when the file is absent.
    pub fn load(&mut self) -> Result<()> {
        if let Some(parent) = self.prefs_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        if self.prefs_path.exists() {
            let prefs_str = fs::read_to_string(&self.prefs_path)?;
            self.prefs = serde_json::from_str(&prefs_str)
                .map_err(|e| anyhow!("Failed to parse preferences: {}", e))?;
        }

        Ok(())
    }

    /// Write the current preferences to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.prefs_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let prefs_str = serde_json::to_string_pretty(&self.prefs)?;
        fs::write(&self.prefs_path, prefs_str)?;
        Ok(())
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Prefs {
        &mut self.prefs
    }

    pub fn prefs_path(&self) -> &Path {
        &self.prefs_path
    }
}

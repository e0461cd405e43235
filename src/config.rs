//! Settings loading and management
//!
//! Settings live in a JSON file. A missing or unreadable file falls back
//! to the defaults so the companion can always start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::overlay::OverlayConfig;

/// Errors from reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HOME is not set")]
    NoHome,

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Hotkey combos for the built-in companion actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeySettings {
    pub toggle_overlay: String,
    pub insert_snippet: String,
    pub format_code: String,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            toggle_overlay: "ctrl+shift+o".to_string(),
            insert_snippet: "ctrl+shift+s".to_string(),
            format_code: "ctrl+shift+f".to_string(),
        }
    }
}

/// A named code snippet offered by the insert-snippet action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub name: String,
    pub code: String,
}

fn default_snippets() -> Vec<Snippet> {
    vec![
        Snippet {
            name: "Python Function".to_string(),
            code: "def function_name(param):\n    \"\"\"Docstring\"\"\"\n    pass".to_string(),
        },
        Snippet {
            name: "JavaScript Function".to_string(),
            code: "function functionName(param) {\n    // Comment\n    return value;\n}"
                .to_string(),
        },
    ]
}

/// Overlay colours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub background: String,
    pub foreground: String,
    pub accent: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: "#2b2b2b".to_string(),
            foreground: "#ffffff".to_string(),
            accent: "#007acc".to_string(),
        }
    }
}

/// Optional feature switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    pub handbrake_integration: bool,
    pub auto_format: bool,
    pub snippet_suggestions: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            handbrake_integration: true,
            auto_format: true,
            snippet_suggestions: true,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Also read from the `window` section of older settings files
    #[serde(default, alias = "window")]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub hotkeys: HotkeySettings,

    #[serde(default = "default_snippets")]
    pub snippets: Vec<Snippet>,

    #[serde(default)]
    pub theme: ThemeSettings,

    #[serde(default)]
    pub features: FeatureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay: OverlayConfig::default(),
            hotkeys: HotkeySettings::default(),
            snippets: default_snippets(),
            theme: ThemeSettings::default(),
            features: FeatureSettings::default(),
        }
    }
}

impl Settings {
    /// Default settings path: `$HOME/.config/aicodex/settings.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("aicodex")
            .join("settings.json"))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(?path, "settings file not found, using defaults");
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(settings) => {
                info!(?path, "settings loaded");
                settings
            }
            Err(e) => {
                warn!(%e, "error loading settings, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings, reporting any read or parse failure
    pub fn load_strict(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(write_err)?;

        info!(?path, "settings saved");
        Ok(())
    }
}

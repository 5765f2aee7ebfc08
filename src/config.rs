//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
//! 3. Environment variables: `KINTREE_*` prefix
//! 4. `--file` CLI flag (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration failure (unreadable or unparsable config source).
#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

/// Unified configuration for kintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON data file
    pub data_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("family_tree_data.json"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    data_file: Option<PathBuf>,
}

/// Get the XDG config directory for kintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kintree.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                if let Some(data_file) = raw.data_file {
                    current.data_file = data_file;
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply KINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("KINTREE").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/kintree/kintree.toml
#   Env:    KINTREE_* environment variables (explicit overrides)
#   Flag:   kintree --file <path>

# Path of the JSON data file (supports ~ and $VAR)
# data_file = "~/family_tree_data.json"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError {
        message: e.to_string(),
    }
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Uses shellexpand for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

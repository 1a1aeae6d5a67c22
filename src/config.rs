//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/courseware/courseware.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `COURSEWARE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, EncodeOptions};
use crate::domain::Color;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_tile_color: Option<String>,
    pub pretty: Option<bool>,
    pub indent: Option<usize>,
}

/// Unified configuration for courseware.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fallback color for tiles without one, as `#RRGGBB` or `#AARRGGBB`
    pub default_tile_color: Option<String>,
    /// Pretty-print encoded catalogs (default: true)
    pub pretty: bool,
    /// Indentation width when pretty-printing (default: 2)
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let options = EncodeOptions::default();
        Self {
            default_tile_color: None,
            pretty: options.pretty,
            indent: options.indent,
        }
    }
}

/// Get the XDG config directory for courseware.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "courseware").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("courseware.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_tile_color: overlay
                .default_tile_color
                .clone()
                .or_else(|| self.default_tile_color.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            indent: overlay.indent.unwrap_or(self.indent),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Load settings from the given file layers, then environment overrides.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_layers(
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config
        if let Some(path) = explicit {
            debug!("load: explicit config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit user override)
        current = Self::apply_env_overrides(current)?;

        // Reject a bad color at load time rather than at first use
        current.tile_color()?;

        Ok(current)
    }

    /// Apply COURSEWARE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("COURSEWARE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_tile_color") {
            settings.default_tile_color = Some(val);
        }
        if config.get_string("pretty").is_ok() {
            settings.pretty = config.get_bool("pretty").map_err(config_err)?;
        }
        if config.get_string("indent").is_ok() {
            let indent = config.get_int("indent").map_err(config_err)?;
            settings.indent = usize::try_from(indent).map_err(|_| ApplicationError::Config {
                message: format!("indent must be non-negative, got {indent}"),
            })?;
        }

        Ok(settings)
    }

    /// The configured default tile color, if any.
    pub fn tile_color(&self) -> Result<Option<Color>, ApplicationError> {
        self.default_tile_color
            .as_deref()
            .map(Color::parse_hex)
            .transpose()
            .map_err(|e| ApplicationError::Config {
                message: format!("default_tile_color: {e}"),
            })
    }

    /// Encoder layout derived from these settings.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            pretty: self.pretty,
            indent: self.indent,
        }
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

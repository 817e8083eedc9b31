//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/poreport/poreport.toml`
//! 3. Local config: `<project_dir>/.poreport.toml`
//! 4. Environment variables: `POREPORT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Default upper bound for input documents (10 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Unified configuration for poreport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prefix for item prices in the report
    pub currency_symbol: String,
    /// Shown in place of absent optional values
    pub missing_placeholder: String,
    /// Inputs larger than this are rejected before parsing
    pub max_input_bytes: u64,
    /// Accept documents with a DOCTYPE declaration
    pub allow_dtd: bool,
    /// Default depth for the structure outline
    pub outline_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            missing_placeholder: "-".into(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            allow_dtd: false,
            outline_depth: 1,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub currency_symbol: Option<String>,
    pub missing_placeholder: Option<String>,
    pub max_input_bytes: Option<u64>,
    pub allow_dtd: Option<bool>,
    pub outline_depth: Option<usize>,
}

/// Get the XDG config directory for poreport.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "poreport").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("poreport.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".poreport.toml")
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
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            currency_symbol: overlay
                .currency_symbol
                .clone()
                .unwrap_or_else(|| self.currency_symbol.clone()),
            missing_placeholder: overlay
                .missing_placeholder
                .clone()
                .unwrap_or_else(|| self.missing_placeholder.clone()),
            max_input_bytes: overlay.max_input_bytes.unwrap_or(self.max_input_bytes),
            allow_dtd: overlay.allow_dtd.unwrap_or(self.allow_dtd),
            outline_depth: overlay.outline_depth.unwrap_or(self.outline_depth),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.poreport.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Load only compiled defaults plus a single config file.
    ///
    /// No global config, no environment variables. Useful for inspecting one file.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply POREPORT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("POREPORT").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("currency_symbol") {
            settings.currency_symbol = val;
        }
        if let Ok(val) = config.get_string("missing_placeholder") {
            settings.missing_placeholder = val;
        }
        if config.get_string("max_input_bytes").is_ok() {
            settings.max_input_bytes = config.get::<u64>("max_input_bytes").map_err(config_err)?;
        }
        if config.get_string("allow_dtd").is_ok() {
            settings.allow_dtd = config.get_bool("allow_dtd").map_err(config_err)?;
        }
        if config.get_string("outline_depth").is_ok() {
            settings.outline_depth = config.get::<usize>("outline_depth").map_err(config_err)?;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

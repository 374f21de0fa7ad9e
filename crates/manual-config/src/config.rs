// crates/manual-config/src/config.rs
// ============================================================================
// Module: Manual Configuration
// Description: Configuration loading and validation for Manual world builds.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and falls back to its defaults; values that are
//! present must pass validation or the whole file is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "manual.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "MANUAL_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a configured display name.
pub(crate) const MAX_NAME_LENGTH: usize = 255;
/// Filler item name used when none is configured.
pub const DEFAULT_FILLER_ITEM_NAME: &str = "(filler)";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Manual world build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualConfig {
    /// Registration behavior.
    #[serde(default)]
    pub world: WorldConfig,
    /// Reachability expansion in generated documents.
    #[serde(default)]
    pub expansion: ExpansionConfig,
    /// Game document defaults.
    #[serde(default)]
    pub game: GameConfig,
}

impl ManualConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path argument wins, then `MANUAL_CONFIG`, then `manual.toml` in
    /// the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is oversized, malformed, or
    /// fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}

/// Registration behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Reject unresolved references and invalid names instead of repairing them.
    #[serde(default = "default_strict")]
    pub strict: bool,
    /// Priority given to items created implicitly or registered without one.
    #[serde(default)]
    pub fallback_priority: FallbackPriority,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            strict: default_strict(),
            fallback_priority: FallbackPriority::default(),
        }
    }
}

/// Named item classification accepted in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPriority {
    /// No flags; treated as filler by the randomizer.
    #[serde(rename = "none")]
    Unclassified,
    /// Negative impact on the player.
    Trap,
    /// Regular or trash item.
    Filler,
    /// Especially useful item.
    Useful,
    /// Item that may be required to progress.
    #[default]
    Progression,
    /// Especially useful progression item.
    ProgressionUseful,
    /// Item excluded from progression balancing.
    SkipBalancing,
    /// Progression item excluded from progression balancing.
    ProgressionSkipBalancing,
    /// Especially useful progression item excluded from balancing.
    ProgressionUsefulSkipBalancing,
    /// Every copy stays in the owning world.
    Local,
}

/// Reachability expansion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Inline region and location reachability into emitted requirements.
    #[serde(default)]
    pub inline_reachability: bool,
    /// Report unreachable regions through `tracing` during expansion.
    #[serde(default = "default_report_unreachable")]
    pub report_unreachable: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            inline_reachability: false,
            report_unreachable: default_report_unreachable(),
        }
    }
}

/// Game document defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Name of the item used to fill empty locations.
    #[serde(default = "default_filler_item_name")]
    pub filler_item_name: String,
    /// First id assigned to items and locations.
    #[serde(default = "default_starting_index")]
    pub starting_index: i64,
    /// Creator written when a game does not name one.
    #[serde(default)]
    pub creator: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            filler_item_name: default_filler_item_name(),
            starting_index: default_starting_index(),
            creator: None,
        }
    }
}

impl GameConfig {
    /// Validates game defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_name("game.filler_item_name", &self.filler_item_name)?;
        if self.starting_index < 1 {
            return Err(ConfigError::Invalid(
                "game.starting_index must be at least 1".to_string(),
            ));
        }
        if let Some(creator) = &self.creator {
            validate_name("game.creator", creator)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured display name.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Default strict mode.
const fn default_strict() -> bool {
    true
}

/// Default unreachable-region reporting.
const fn default_report_unreachable() -> bool {
    true
}

/// Default filler item name.
fn default_filler_item_name() -> String {
    DEFAULT_FILLER_ITEM_NAME.to_string()
}

/// Default first id.
const fn default_starting_index() -> i64 {
    1
}

// ============================================================================
// SECTION: Tests
// ============================================================================

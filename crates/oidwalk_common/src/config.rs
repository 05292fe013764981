//! Configuration for oidwalk.
//!
//! Loaded from `--config <path>` or `$XDG_CONFIG_HOME/oidwalk/config.toml`,
//! otherwise defaults. Every field has a default so partial files work.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory under the user config dir
pub const CONFIG_DIR_NAME: &str = "oidwalk";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// External tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// `snmpwalk` binary (name on PATH or absolute path)
    #[serde(default = "default_snmpwalk")]
    pub snmpwalk: String,

    /// `snmptranslate` binary
    #[serde(default = "default_snmptranslate")]
    pub snmptranslate: String,

    /// Timeout for one subtree walk
    #[serde(default = "default_walk_timeout")]
    pub walk_timeout_secs: u64,

    /// Timeout for one translate call
    #[serde(default = "default_translate_timeout")]
    pub translate_timeout_secs: u64,

    /// Translate calls in flight at once (valid: 1-64)
    #[serde(default = "default_translate_concurrency")]
    pub translate_concurrency: usize,
}

fn default_snmpwalk() -> String {
    "snmpwalk".to_string()
}

fn default_snmptranslate() -> String {
    "snmptranslate".to_string()
}

fn default_walk_timeout() -> u64 {
    60
}

fn default_translate_timeout() -> u64 {
    10
}

fn default_translate_concurrency() -> usize {
    4
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            snmpwalk: default_snmpwalk(),
            snmptranslate: default_snmptranslate(),
            walk_timeout_secs: default_walk_timeout(),
            translate_timeout_secs: default_translate_timeout(),
            translate_concurrency: default_translate_concurrency(),
        }
    }
}

impl ToolSettings {
    pub fn effective_walk_timeout(&self) -> u64 {
        self.walk_timeout_secs.max(1)
    }

    pub fn effective_translate_timeout(&self) -> u64 {
        self.translate_timeout_secs.max(1)
    }

    /// Clamp translate_concurrency to 1-64
    pub fn effective_concurrency(&self) -> usize {
        self.translate_concurrency.clamp(1, 64)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolSettings,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// `$XDG_CONFIG_HOME/oidwalk/config.toml` (or the platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or from the default location if present.
    ///
    /// An explicit path must exist and parse. A missing default file is not
    /// an error and yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

//! Configuration module for the embed harness
//!
//! This module handles the operator's harness configuration:
//! - Session settings (initial embed type, reset policy, seeded credentials)
//! - Logging filter and optional log directory
//! - Behavior of the built-in logging collaborator
//!
//! Nothing about a session is written back; the configuration file is only
//! ever read at startup (or written explicitly with [`HarnessConfig::save_to`]).
//!
//! # Config Location
//!
//! The default configuration file lives in the platform config directory:
//! - **Linux**: `~/.config/dev.embed-harness/harness.toml`
//! - **macOS**: `~/Library/Application Support/dev.embed-harness/harness.toml`
//! - **Windows**: `%APPDATA%\dev.embed-harness\harness.toml`
//!
//! # Example
//!
//! ```toml
//! [session]
//! initial_embed_type = "dashboard"
//! preserve_connection_on_option_change = true
//!
//! [session.seed]
//! tokenType = "Embed"
//! embedUrl = "https://app.example.com/dashboardEmbed"
//!
//! [logging]
//! filter = "info,embed_harness=trace"
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{HarnessError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.embed-harness";

/// Config filename
pub const CONFIG_FILE: &str = "harness.toml";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,embed_harness=debug";

/// Prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "embed-harness.log";

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Harness Config ====================

/// Complete harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub collaborator: CollaboratorConfig,
}

fn default_config_version() -> u32 {
    1
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            version: 1,
            session: SessionSettings::default(),
            logging: LoggingConfig::default(),
            collaborator: CollaboratorConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load config from the default location, or defaults if there is no file
    pub fn load() -> Result<Self> {
        let path = default_config_path().ok_or_else(|| {
            HarnessError::Config("Could not determine config directory".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load harness config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load config from a specific TOML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(HarnessError::from)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        toml::from_str(&content)
            .map_err(|e| HarnessError::Config(e.to_string()))
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Save config to a TOML file, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(HarnessError::from)
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::Serialization(e.to_string()))
            .context("Failed to serialize config")?;

        std::fs::write(path, content)
            .map_err(HarnessError::from)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Directory for daily rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_dir: None,
        }
    }
}

/// Behavior of the built-in logging collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    /// Emit load/render callbacks right after mounting
    #[serde(default = "default_true")]
    pub simulate_lifecycle: bool,

    /// Reject every settings update and save
    #[serde(default)]
    pub fail_requests: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            simulate_lifecycle: true,
            fail_requests: false,
        }
    }
}

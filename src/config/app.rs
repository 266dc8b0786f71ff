//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! club-ladder engine, including environment variable loading, TOML file
//! loading, and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub ladder: LadderSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Snapshot storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path of the JSON snapshot file; None keeps state in memory only
    pub snapshot_path: Option<PathBuf>,
    /// Pretty-print the snapshot JSON
    pub pretty_json: bool,
}

/// Ladder-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderSettings {
    /// Default number of match records returned by history reads
    pub default_match_limit: usize,
    /// Densify ranks immediately after seeding a season
    pub densify_on_init: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "club-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            pretty_json: false,
        }
    }
}

impl Default for LadderSettings {
    fn default() -> Self {
        Self {
            default_match_limit: 100,
            densify_on_init: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(path) = env::var("SNAPSHOT_PATH") {
            config.storage.snapshot_path = Some(PathBuf::from(path));
        }
        if let Ok(pretty) = env::var("SNAPSHOT_PRETTY_JSON") {
            config.storage.pretty_json = pretty
                .parse()
                .map_err(|_| anyhow!("Invalid SNAPSHOT_PRETTY_JSON value: {}", pretty))?;
        }

        // Ladder settings
        if let Ok(limit) = env::var("LADDER_MATCH_LIMIT") {
            config.ladder.default_match_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid LADDER_MATCH_LIMIT value: {}", limit))?;
        }
        if let Ok(densify) = env::var("LADDER_DENSIFY_ON_INIT") {
            config.ladder.densify_on_init = densify
                .parse()
                .map_err(|_| anyhow!("Invalid LADDER_DENSIFY_ON_INIT value: {}", densify))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load from an explicit file when given, otherwise from the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if config.ladder.default_match_limit == 0 {
        return Err(anyhow!("Default match limit must be greater than 0"));
    }

    Ok(())
}

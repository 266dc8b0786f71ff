//! Configuration management for the club-ladder engine
//!
//! This module handles all configuration loading from environment variables
//! and TOML files, validation, and default values for the ladder service.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, LadderSettings, ServiceSettings, StorageSettings};

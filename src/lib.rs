//! Club Ladder - Season-based competitive ladder engine
//!
//! This crate provides rule-driven rank resolution with season seeding,
//! player identity management, and snapshot persistence for club-scale
//! ladder competitions.

pub mod config;
pub mod error;
pub mod ladder;
pub mod registry;
pub mod service;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use service::LadderService;
pub use store::{JsonFileSnapshot, MemoryLadderStore, NullSnapshot, SnapshotStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

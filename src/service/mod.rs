//! Service layer for the club ladder engine
//!
//! This module contains the main service facade and the counters it
//! keeps about its own activity.

pub mod app;
pub mod stats;

pub use app::LadderService;
pub use stats::ServiceStats;

//! Service statistics
//!
//! Counters for the operations the ladder service has performed since it
//! started, plus current roster/season gauges filled in at read time.

use serde::{Deserialize, Serialize};

/// Statistics about ladder service operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Total seasons initialized
    pub seasons_created: u64,
    /// Total players registered (first-sight creations)
    pub players_registered: u64,
    /// Total matches reported
    pub matches_reported: u64,
    /// Total explicit placements that created a new ranking entry
    pub placements_performed: u64,
    /// Total densify maintenance runs
    pub densify_runs: u64,
    /// Current number of registered players
    pub total_players: usize,
    /// Current number of seasons
    pub total_seasons: usize,
}

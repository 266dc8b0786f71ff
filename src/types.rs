//! Common types used throughout the ladder engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = u64;

/// Unique identifier for seasons
pub type SeasonId = u64;

/// Unique identifier for match records
pub type MatchId = Uuid;

/// Ladder position. Lower value = better standing; ranks are not
/// guaranteed unique or contiguous within a season.
pub type Rank = u32;

/// Registered player identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub active: bool,
}

/// A ranking universe keyed by year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub year: i32,
}

/// Association of one player to one rank within a season.
/// At most one entry exists per (season, player) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    pub rank: Rank,
}

/// Immutable match log entry. Append-only; never consulted by the
/// rank-resolution rules, which read only current ranking entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub season_id: SeasonId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub played_at: DateTime<Utc>,
    pub score: Option<String>,
    pub note: Option<String>,
    /// Insertion counter, secondary sort key for history reads
    pub seq: u64,
}

/// Seed input for season initialization, resolved once at the boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SeedList {
    /// Names in ladder order; rank = 1-based position. Blank names are
    /// skipped but their positions are kept, leaving rank gaps.
    Ordered { names: Vec<String> },
    /// Explicit (name, rank) pairs written exactly as given; duplicate
    /// ranks are permitted and become ties.
    Explicit { entries: Vec<SeedEntry> },
}

/// One explicit seed: a name and the rank it starts at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    pub name: String,
    pub rank: Rank,
}

impl SeedEntry {
    pub fn new(name: impl Into<String>, rank: Rank) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }
}

/// A match report as submitted at the service boundary.
/// The played-at timestamp arrives as the caller's raw string and is
/// parsed by the service; absent means "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSubmission {
    pub season_id: SeasonId,
    pub winner_name: String,
    pub loser_name: String,
    pub played_at: Option<String>,
    pub score: Option<String>,
    pub note: Option<String>,
}

impl MatchSubmission {
    pub fn new(
        season_id: SeasonId,
        winner_name: impl Into<String>,
        loser_name: impl Into<String>,
    ) -> Self {
        Self {
            season_id,
            winner_name: winner_name.into(),
            loser_name: loser_name.into(),
            played_at: None,
            score: None,
            note: None,
        }
    }
}

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub player_id: PlayerId,
    pub final_rank: Rank,
    /// True when the player already had an entry and nothing was mutated
    pub existed: bool,
}

/// One row of a ladder read, ascending by rank then player id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderRow {
    pub rank: Rank,
    pub player_id: PlayerId,
    pub name: String,
}

/// Match history row with display names joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub played_at: DateTime<Utc>,
    pub winner_id: PlayerId,
    pub winner_name: String,
    pub loser_id: PlayerId,
    pub loser_name: String,
    pub score: Option<String>,
    pub note: Option<String>,
}

/// Season listing row, ordered by year descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub id: SeasonId,
    pub year: i32,
}

/// Lookup selector for resolving a season from partial input.
/// A present season id always wins; year is consulted only in its absence.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeasonSelector {
    pub season_id: Option<SeasonId>,
    pub year: Option<i32>,
}

impl SeasonSelector {
    pub fn by_id(season_id: SeasonId) -> Self {
        Self {
            season_id: Some(season_id),
            year: None,
        }
    }

    pub fn by_year(year: i32) -> Self {
        Self {
            season_id: None,
            year: Some(year),
        }
    }
}

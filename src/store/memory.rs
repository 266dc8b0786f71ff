//! In-memory ladder state and the transactional store around it
//!
//! `LadderState` is the complete domain state: players, seasons, ranking
//! entries, and the append-only match log. `MemoryLadderStore` wraps one
//! `LadderState` in a `tokio::sync::RwLock` and runs every mutation as an
//! all-or-nothing transaction: clone the state, apply the operation to the
//! clone, persist a snapshot, and only then commit the clone as live state.
//! Read-modify-write sequences on the ladder are therefore serialized, and
//! a failed operation never leaves partial rank updates visible.

use crate::error::{LadderError, Result};
use crate::store::snapshot::SnapshotStore;
use crate::types::{MatchRecord, Player, PlayerId, Rank, RankingEntry, Season, SeasonId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Complete persisted ladder state
///
/// Collections are plain vectors in creation order; the data set is small
/// (club rosters) and the stable order doubles as the insertion-order
/// tie-break for reads. Counters hold the last id handed out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LadderState {
    pub players: Vec<Player>,
    pub seasons: Vec<Season>,
    pub entries: Vec<RankingEntry>,
    pub matches: Vec<MatchRecord>,
    pub last_player_id: u64,
    pub last_season_id: u64,
    pub last_match_seq: u64,
}

impl LadderState {
    /// Look up a player by id
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable player lookup by id
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a player by exact (trimmed) name
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Display name for a player id, if known
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }

    /// Create a player record and hand out its id.
    /// Callers check name uniqueness first; see the registry.
    pub fn allocate_player(&mut self, name: String) -> PlayerId {
        self.last_player_id += 1;
        let id = self.last_player_id;
        self.players.push(Player {
            id,
            name,
            active: true,
        });
        id
    }

    /// Look up a season by id
    pub fn season(&self, id: SeasonId) -> Option<&Season> {
        self.seasons.iter().find(|s| s.id == id)
    }

    /// Look up a season by year
    pub fn season_by_year(&self, year: i32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.year == year)
    }

    /// Create a season record and hand out its id.
    /// Callers check year uniqueness first; see placement.
    pub fn allocate_season(&mut self, year: i32) -> SeasonId {
        self.last_season_id += 1;
        let id = self.last_season_id;
        self.seasons.push(Season { id, year });
        id
    }

    /// Ranking entry for one (season, player) pair
    pub fn entry(&self, season_id: SeasonId, player_id: PlayerId) -> Option<&RankingEntry> {
        self.entries
            .iter()
            .find(|e| e.season_id == season_id && e.player_id == player_id)
    }

    /// Mutable ranking entry for one (season, player) pair
    pub fn entry_mut(
        &mut self,
        season_id: SeasonId,
        player_id: PlayerId,
    ) -> Option<&mut RankingEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.season_id == season_id && e.player_id == player_id)
    }

    /// All ranking entries of one season, in insertion order
    pub fn season_entries(&self, season_id: SeasonId) -> impl Iterator<Item = &RankingEntry> + '_ {
        self.entries.iter().filter(move |e| e.season_id == season_id)
    }

    /// Mutable view of one season's ranking entries
    pub fn season_entries_mut(
        &mut self,
        season_id: SeasonId,
    ) -> impl Iterator<Item = &mut RankingEntry> + '_ {
        self.entries
            .iter_mut()
            .filter(move |e| e.season_id == season_id)
    }

    /// Worst (numerically highest) rank currently held in a season
    pub fn max_rank(&self, season_id: SeasonId) -> Option<Rank> {
        self.season_entries(season_id).map(|e| e.rank).max()
    }

    /// Append a ranking entry. Callers enforce the (season, player)
    /// uniqueness invariant before pushing.
    pub fn push_entry(&mut self, season_id: SeasonId, player_id: PlayerId, rank: Rank) {
        debug_assert!(self.entry(season_id, player_id).is_none());
        self.entries.push(RankingEntry {
            season_id,
            player_id,
            rank,
        });
    }

    /// Hand out the next match insertion sequence number
    pub fn next_match_seq(&mut self) -> u64 {
        self.last_match_seq += 1;
        self.last_match_seq
    }

    /// Check the structural invariants a snapshot must satisfy.
    ///
    /// Snapshots are operator-visible JSON and may have been edited by
    /// hand, so a load re-checks what the write path guarantees: unique
    /// player names, unique season years, unique (season, player) pairs,
    /// positive ranks, and no dangling ids.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut player_ids = HashSet::new();
        for player in &self.players {
            if !names.insert(player.name.as_str()) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: duplicate player name {:?}",
                    player.name
                ))
                .into());
            }
            if !player_ids.insert(player.id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: duplicate player id {}",
                    player.id
                ))
                .into());
            }
        }

        let mut years = HashSet::new();
        let mut season_ids = HashSet::new();
        for season in &self.seasons {
            if !years.insert(season.year) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: duplicate season year {}",
                    season.year
                ))
                .into());
            }
            if !season_ids.insert(season.id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: duplicate season id {}",
                    season.id
                ))
                .into());
            }
        }

        let mut pairs = HashSet::new();
        for entry in &self.entries {
            if entry.rank < 1 {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: non-positive rank for player {} in season {}",
                    entry.player_id, entry.season_id
                ))
                .into());
            }
            if !pairs.insert((entry.season_id, entry.player_id)) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: duplicate ranking entry for player {} in season {}",
                    entry.player_id, entry.season_id
                ))
                .into());
            }
            if !season_ids.contains(&entry.season_id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: ranking entry references unknown season {}",
                    entry.season_id
                ))
                .into());
            }
            if !player_ids.contains(&entry.player_id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: ranking entry references unknown player {}",
                    entry.player_id
                ))
                .into());
            }
        }

        for record in &self.matches {
            if !season_ids.contains(&record.season_id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: match {} references unknown season {}",
                    record.id, record.season_id
                ))
                .into());
            }
            if !player_ids.contains(&record.winner_id) || !player_ids.contains(&record.loser_id) {
                return Err(LadderError::storage(format!(
                    "corrupt snapshot: match {} references unknown player",
                    record.id
                ))
                .into());
            }
        }

        Ok(())
    }
}

/// Transactional store over one `LadderState`
pub struct MemoryLadderStore {
    state: RwLock<LadderState>,
    snapshot: Arc<dyn SnapshotStore>,
}

impl std::fmt::Debug for MemoryLadderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLadderStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl MemoryLadderStore {
    /// Create an empty store persisting through the given snapshot store
    pub fn new(snapshot: Arc<dyn SnapshotStore>) -> Self {
        Self {
            state: RwLock::new(LadderState::default()),
            snapshot,
        }
    }

    /// Open a store, loading and validating the existing snapshot if any
    pub async fn open(snapshot: Arc<dyn SnapshotStore>) -> Result<Self> {
        let state = match snapshot.load().await? {
            Some(state) => {
                state.validate()?;
                state
            }
            None => LadderState::default(),
        };
        Ok(Self {
            state: RwLock::new(state),
            snapshot,
        })
    }

    /// Run a read-only operation against the current state
    pub async fn read<T, F>(&self, op: F) -> T
    where
        F: FnOnce(&LadderState) -> T,
    {
        let guard = self.state.read().await;
        op(&guard)
    }

    /// Run a mutating operation as one atomic transaction.
    ///
    /// The operation works on a clone of the live state. On success the
    /// clone is persisted and then committed; on any error (from the
    /// operation or the snapshot write) the clone is discarded and the
    /// live state is untouched.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut LadderState) -> Result<T>,
    {
        let mut guard = self.state.write().await;
        let mut draft = guard.clone();
        let value = op(&mut draft)?;
        self.snapshot.persist(&draft).await?;
        *guard = draft;
        Ok(value)
    }
}

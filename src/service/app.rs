//! Ladder service orchestration
//!
//! `LadderService` owns the transactional store and exposes the public
//! operations of the ladder engine: identity resolution, season seeding,
//! placement, match reporting, rank normalization, and the read queries.
//! Every mutating operation runs as one store transaction and commits or
//! rolls back as a whole.

use crate::config::LadderSettings;
use crate::error::{LadderError, Result};
use crate::ladder::{normalize, placement, resolution};
use crate::registry::players;
use crate::service::stats::ServiceStats;
use crate::store::memory::MemoryLadderStore;
use crate::store::snapshot::SnapshotStore;
use crate::types::{
    LadderRow, MatchId, MatchSubmission, MatchView, PlacementOutcome, Player, PlayerId, Rank,
    SeasonId, SeasonSelector, SeasonSummary, SeedList,
};
use crate::utils::{current_timestamp, parse_played_at};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// The main ladder service
#[derive(Clone)]
pub struct LadderService {
    /// Transactional ranking store
    store: Arc<MemoryLadderStore>,
    /// Ladder behavior settings
    settings: LadderSettings,
    /// Service statistics
    stats: Arc<RwLock<ServiceStats>>,
}

impl LadderService {
    /// Create a service over an existing store
    pub fn new(store: Arc<MemoryLadderStore>, settings: LadderSettings) -> Self {
        Self {
            store,
            settings,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Open a service, loading prior state from the given snapshot store
    pub async fn open(snapshot: Arc<dyn SnapshotStore>, settings: LadderSettings) -> Result<Self> {
        let store = MemoryLadderStore::open(snapshot).await?;
        Ok(Self::new(Arc::new(store), settings))
    }

    /// Resolve a display name to a player id, creating the player if new
    pub async fn resolve_player(&self, name: &str) -> Result<PlayerId> {
        let (player_id, registered) = self
            .store
            .mutate(|state| {
                let before = state.players.len();
                let id = players::resolve_player(state, name)?;
                Ok((id, state.players.len() - before))
            })
            .await?;

        self.bump(|stats| stats.players_registered += registered as u64)?;
        if registered > 0 {
            info!("Player '{}' registered as id {}", name.trim(), player_id);
        }
        Ok(player_id)
    }

    /// Create and seed a season for a year
    pub async fn init_season(&self, year: i32, seeds: SeedList) -> Result<SeasonId> {
        let densify_on_init = self.settings.densify_on_init;
        let (season_id, registered) = self
            .store
            .mutate(move |state| {
                let before = state.players.len();
                let season_id = placement::init_season(state, year, &seeds)?;
                if densify_on_init {
                    normalize::densify_ranks(state, season_id)?;
                }
                Ok((season_id, state.players.len() - before))
            })
            .await?;

        self.bump(|stats| {
            stats.seasons_created += 1;
            stats.players_registered += registered as u64;
        })?;
        info!("Season {} initialized for year {}", season_id, year);
        Ok(season_id)
    }

    /// Insert a player into a season's ladder
    pub async fn place_player(
        &self,
        season_id: SeasonId,
        name: &str,
        rank: Option<Rank>,
    ) -> Result<PlacementOutcome> {
        let (outcome, registered) = self
            .store
            .mutate(|state| {
                let before = state.players.len();
                let outcome = placement::place_player(state, season_id, name, rank)?;
                Ok((outcome, state.players.len() - before))
            })
            .await?;

        self.bump(|stats| {
            stats.players_registered += registered as u64;
            if !outcome.existed {
                stats.placements_performed += 1;
            }
        })?;
        if outcome.existed {
            info!(
                "Player {} already in season {} at rank {}, placement unchanged",
                outcome.player_id, season_id, outcome.final_rank
            );
        } else {
            info!(
                "Player {} placed at rank {} in season {}",
                outcome.player_id, outcome.final_rank, season_id
            );
        }
        Ok(outcome)
    }

    /// Record a match and resolve its effect on the ladder
    pub async fn report_match(&self, submission: MatchSubmission) -> Result<MatchId> {
        let played_at = match submission.played_at.as_deref() {
            Some(raw) => parse_played_at(raw)?,
            None => current_timestamp(),
        };

        let MatchSubmission {
            season_id,
            winner_name,
            loser_name,
            score,
            note,
            ..
        } = submission;

        let (match_id, registered) = self
            .store
            .mutate(move |state| {
                let before = state.players.len();
                let match_id = resolution::report_match(
                    state,
                    season_id,
                    &winner_name,
                    &loser_name,
                    played_at,
                    score,
                    note,
                )?;
                Ok((match_id, state.players.len() - before))
            })
            .await?;

        self.bump(|stats| {
            stats.matches_reported += 1;
            stats.players_registered += registered as u64;
        })?;
        info!("Match {} recorded in season {}", match_id, season_id);
        Ok(match_id)
    }

    /// Collapse a season's rank values to a contiguous 1..K sequence
    pub async fn densify_ranks(&self, season_id: SeasonId) -> Result<usize> {
        let changed = self
            .store
            .mutate(move |state| normalize::densify_ranks(state, season_id))
            .await?;

        self.bump(|stats| stats.densify_runs += 1)?;
        info!(
            "Densify run on season {} changed {} entries",
            season_id, changed
        );
        Ok(changed)
    }

    /// Toggle a player's active flag
    pub async fn set_player_active(&self, player_id: PlayerId, active: bool) -> Result<()> {
        self.store
            .mutate(move |state| players::set_player_active(state, player_id, active))
            .await?;
        info!(
            "Player {} marked {}",
            player_id,
            if active { "active" } else { "inactive" }
        );
        Ok(())
    }

    /// Current ladder of a season, ascending by rank then player id
    pub async fn get_ladder(&self, season_id: SeasonId) -> Result<Vec<LadderRow>> {
        self.store
            .read(move |state| {
                if state.season(season_id).is_none() {
                    return Err(LadderError::not_found(format!("season {}", season_id)).into());
                }
                let mut rows: Vec<LadderRow> = state
                    .season_entries(season_id)
                    .map(|entry| LadderRow {
                        rank: entry.rank,
                        player_id: entry.player_id,
                        name: state
                            .player_name(entry.player_id)
                            .unwrap_or("unknown")
                            .to_string(),
                    })
                    .collect();
                rows.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.player_id.cmp(&b.player_id)));
                Ok(rows)
            })
            .await
    }

    /// Match history of a season, most recent first.
    /// Falls back to the configured default when no limit is given.
    pub async fn get_matches(
        &self,
        season_id: SeasonId,
        limit: Option<usize>,
    ) -> Result<Vec<MatchView>> {
        let limit = limit.unwrap_or(self.settings.default_match_limit);
        self.store
            .read(move |state| {
                if state.season(season_id).is_none() {
                    return Err(LadderError::not_found(format!("season {}", season_id)).into());
                }
                let mut records: Vec<_> = state
                    .matches
                    .iter()
                    .filter(|record| record.season_id == season_id)
                    .collect();
                records.sort_by(|a, b| {
                    b.played_at
                        .cmp(&a.played_at)
                        .then_with(|| b.seq.cmp(&a.seq))
                });
                records.truncate(limit);

                Ok(records
                    .into_iter()
                    .map(|record| MatchView {
                        id: record.id,
                        played_at: record.played_at,
                        winner_id: record.winner_id,
                        winner_name: state
                            .player_name(record.winner_id)
                            .unwrap_or("unknown")
                            .to_string(),
                        loser_id: record.loser_id,
                        loser_name: state
                            .player_name(record.loser_id)
                            .unwrap_or("unknown")
                            .to_string(),
                        score: record.score.clone(),
                        note: record.note.clone(),
                    })
                    .collect())
            })
            .await
    }

    /// All seasons, ordered by year descending
    pub async fn list_seasons(&self) -> Result<Vec<SeasonSummary>> {
        Ok(self
            .store
            .read(|state| {
                let mut seasons: Vec<SeasonSummary> = state
                    .seasons
                    .iter()
                    .map(|season| SeasonSummary {
                        id: season.id,
                        year: season.year,
                    })
                    .collect();
                seasons.sort_by(|a, b| b.year.cmp(&a.year));
                seasons
            })
            .await)
    }

    /// Resolve a season from partial input.
    ///
    /// A present season id decides alone, even when a year is also given;
    /// the year is consulted only when the id is absent. Unknown values
    /// resolve to None rather than an error.
    pub async fn resolve_season_id(&self, selector: SeasonSelector) -> Result<Option<SeasonId>> {
        Ok(self
            .store
            .read(move |state| {
                if let Some(season_id) = selector.season_id {
                    return state.season(season_id).map(|s| s.id);
                }
                if let Some(year) = selector.year {
                    return state.season_by_year(year).map(|s| s.id);
                }
                None
            })
            .await)
    }

    /// Full roster, ordered by name
    pub async fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.store.read(players::list_players).await)
    }

    /// Current service statistics
    pub async fn get_stats(&self) -> Result<ServiceStats> {
        let mut stats = self
            .stats
            .read()
            .map_err(|_| LadderError::storage("stats lock poisoned"))?
            .clone();
        let (total_players, total_seasons) = self
            .store
            .read(|state| (state.players.len(), state.seasons.len()))
            .await;
        stats.total_players = total_players;
        stats.total_seasons = total_seasons;
        Ok(stats)
    }

    fn bump<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut ServiceStats),
    {
        let mut stats = self
            .stats
            .write()
            .map_err(|_| LadderError::storage("stats lock poisoned"))?;
        update(&mut stats);
        debug!(
            "Stats: {} seasons, {} players, {} matches, {} placements, {} densify runs",
            stats.seasons_created,
            stats.players_registered,
            stats.matches_reported,
            stats.placements_performed,
            stats.densify_runs
        );
        Ok(())
    }
}

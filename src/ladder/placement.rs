//! Ladder placement: season seeding and player insertion
//!
//! Seeding writes ranking entries exactly as given; placement inserts a
//! single player without disturbing anyone else. Neither operation shifts
//! existing entries, so explicit ranks can create ties and ordered seeds
//! with blanks keep their gaps. All functions run inside one store
//! transaction owned by the caller.

use crate::error::{LadderError, Result};
use crate::registry::players::resolve_player;
use crate::store::memory::LadderState;
use crate::types::{PlacementOutcome, PlayerId, Rank, SeasonId, SeedList};
use crate::utils::normalize_name;
use tracing::{debug, warn};

/// Create a season for a year and seed its initial ranking entries.
///
/// Ordered seeds take their 1-based position as rank; blank names are
/// skipped without reclaiming the position. Explicit seeds are written
/// exactly as given, duplicate ranks included. Invalid entries (blank name,
/// rank below 1) are skipped, never fatal to the batch. A name appearing
/// twice keeps its first entry.
pub fn init_season(state: &mut LadderState, year: i32, seeds: &SeedList) -> Result<SeasonId> {
    if year < 1 {
        return Err(
            LadderError::validation(format!("season year must be positive, got {}", year)).into(),
        );
    }
    if state.season_by_year(year).is_some() {
        return Err(
            LadderError::conflict(format!("season for year {} already exists", year)).into(),
        );
    }

    let season_id = state.allocate_season(year);
    let mut seeded = 0usize;

    match seeds {
        SeedList::Ordered { names } => {
            for (index, raw) in names.iter().enumerate() {
                let position = (index + 1) as Rank;
                let name = match normalize_name(raw) {
                    Ok(name) => name,
                    Err(_) => {
                        warn!("Skipping blank seed name at position {}", position);
                        continue;
                    }
                };
                let player_id = resolve_player(state, &name)?;
                if state.entry(season_id, player_id).is_some() {
                    warn!("Skipping repeated seed name '{}'", name);
                    continue;
                }
                state.push_entry(season_id, player_id, position);
                seeded += 1;
            }
        }
        SeedList::Explicit { entries } => {
            for seed in entries {
                if seed.rank < 1 {
                    warn!("Skipping seed '{}' with non-positive rank", seed.name);
                    continue;
                }
                let name = match normalize_name(&seed.name) {
                    Ok(name) => name,
                    Err(_) => {
                        warn!("Skipping blank seed name at rank {}", seed.rank);
                        continue;
                    }
                };
                let player_id = resolve_player(state, &name)?;
                if state.entry(season_id, player_id).is_some() {
                    warn!("Skipping repeated seed name '{}'", name);
                    continue;
                }
                state.push_entry(season_id, player_id, seed.rank);
                seeded += 1;
            }
        }
    }

    debug!(
        "Initialized season {} for year {} with {} seeded entries",
        season_id, year, seeded
    );
    Ok(season_id)
}

/// Insert a player into a season's ladder.
///
/// Idempotent on the (season, player) pair: if an entry already exists this
/// returns it untouched with `existed = true`. A new entry lands at the
/// given rank, or at the ladder bottom (`max rank + 1`, rank 1 when empty)
/// when no rank is given. Other entries never move, so an explicit rank can
/// tie with its current holder.
pub fn place_player(
    state: &mut LadderState,
    season_id: SeasonId,
    name: &str,
    rank: Option<Rank>,
) -> Result<PlacementOutcome> {
    if state.season(season_id).is_none() {
        return Err(LadderError::not_found(format!("season {}", season_id)).into());
    }
    if rank == Some(0) {
        return Err(LadderError::validation("explicit rank must be at least 1").into());
    }

    let player_id = resolve_player(state, name)?;

    if let Some(entry) = state.entry(season_id, player_id) {
        return Ok(PlacementOutcome {
            player_id,
            final_rank: entry.rank,
            existed: true,
        });
    }

    let final_rank = rank.unwrap_or_else(|| bottom_rank(state, season_id));
    state.push_entry(season_id, player_id, final_rank);
    debug!(
        "Placed player {} at rank {} in season {}",
        player_id, final_rank, season_id
    );

    Ok(PlacementOutcome {
        player_id,
        final_rank,
        existed: false,
    })
}

/// Admit a player at the ladder bottom if they have no entry yet.
///
/// Returns the player's rank either way. Used to auto-admit players named
/// in a match report but never explicitly placed.
pub fn ensure_in_ladder(state: &mut LadderState, season_id: SeasonId, player_id: PlayerId) -> Rank {
    if let Some(entry) = state.entry(season_id, player_id) {
        return entry.rank;
    }
    let rank = bottom_rank(state, season_id);
    state.push_entry(season_id, player_id, rank);
    debug!(
        "Auto-admitted player {} at ladder bottom (rank {}) in season {}",
        player_id, rank, season_id
    );
    rank
}

/// Admit both match participants, returning their ranks.
///
/// When both are missing the bottom is computed once from the pre-match
/// state and they are admitted as a tie; the outcome rule then decides who
/// ends up ahead.
pub fn admit_pair(
    state: &mut LadderState,
    season_id: SeasonId,
    first: PlayerId,
    second: PlayerId,
) -> (Rank, Rank) {
    debug_assert_ne!(first, second);
    let first_rank = state.entry(season_id, first).map(|e| e.rank);
    let second_rank = state.entry(season_id, second).map(|e| e.rank);

    match (first_rank, second_rank) {
        (Some(a), Some(b)) => (a, b),
        (Some(a), None) => {
            let b = ensure_in_ladder(state, season_id, second);
            (a, b)
        }
        (None, Some(b)) => {
            let a = ensure_in_ladder(state, season_id, first);
            (a, b)
        }
        (None, None) => {
            let bottom = bottom_rank(state, season_id);
            state.push_entry(season_id, first, bottom);
            state.push_entry(season_id, second, bottom);
            debug!(
                "Auto-admitted players {} and {} tied at ladder bottom (rank {}) in season {}",
                first, second, bottom, season_id
            );
            (bottom, bottom)
        }
    }
}

fn bottom_rank(state: &LadderState, season_id: SeasonId) -> Rank {
    state.max_rank(season_id).map_or(1, |max| max + 1)
}

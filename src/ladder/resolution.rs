//! Match resolution engine
//!
//! Applies the three-way outcome rule to a season's ranking entries. The
//! rule is minimal-disturbance: each match moves the fewest entries needed
//! to reflect the one relative-ordering fact just observed. Ranks are
//! compared purely relatively; the engine never assumes they are unique or
//! contiguous, and it never renumbers the ladder on its own.

use crate::error::{LadderError, Result};
use crate::ladder::placement::admit_pair;
use crate::registry::players::resolve_player;
use crate::store::memory::LadderState;
use crate::types::{MatchId, MatchRecord, PlayerId, Rank, SeasonId};
use crate::utils::generate_match_id;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Rank movement decided by comparing winner and loser ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankShift {
    /// Winner already outranked the loser; no entry moves
    None,
    /// Winner was ranked worse and jumps to this rank
    Promote { to: Rank },
    /// Winner and loser were tied at this rank; every other holder of it
    /// moves down one
    DemoteTied { at: Rank },
}

/// Decide the rank movement for a match outcome.
///
/// Lower numeric rank = better standing. Exactly one of the three rules
/// applies:
/// - winner better ranked: nothing moves (the expected result)
/// - winner worse ranked (an upset): winner jumps to one above the loser's
///   pre-match rank, floored at 1
/// - equal ranks (a tie-break): winner keeps the rank, all other holders of
///   it are pushed down one
pub fn resolve_outcome(winner_rank: Rank, loser_rank: Rank) -> RankShift {
    if winner_rank < loser_rank {
        RankShift::None
    } else if winner_rank > loser_rank {
        RankShift::Promote {
            to: loser_rank.saturating_sub(1).max(1),
        }
    } else {
        RankShift::DemoteTied { at: winner_rank }
    }
}

/// Apply a decided rank movement to a season's entries.
///
/// Returns the number of entries whose rank changed.
pub fn apply_shift(
    state: &mut LadderState,
    season_id: SeasonId,
    winner_id: PlayerId,
    shift: RankShift,
) -> usize {
    match shift {
        RankShift::None => 0,
        RankShift::Promote { to } => {
            if let Some(entry) = state.entry_mut(season_id, winner_id) {
                entry.rank = to;
                1
            } else {
                0
            }
        }
        RankShift::DemoteTied { at } => {
            let mut moved = 0;
            for entry in state.season_entries_mut(season_id) {
                if entry.player_id != winner_id && entry.rank == at {
                    entry.rank += 1;
                    moved += 1;
                }
            }
            moved
        }
    }
}

/// Record a match and resolve its effect on the ladder.
///
/// Runs the full sequence of one match report: resolve both names (creating
/// players on first sight), append the immutable match record, auto-admit
/// missing participants at the ladder bottom, then decide and apply the
/// rank movement. Callers run this inside one store transaction, so the
/// whole sequence commits or rolls back together.
#[allow(clippy::too_many_arguments)]
pub fn report_match(
    state: &mut LadderState,
    season_id: SeasonId,
    winner_name: &str,
    loser_name: &str,
    played_at: DateTime<Utc>,
    score: Option<String>,
    note: Option<String>,
) -> Result<MatchId> {
    if state.season(season_id).is_none() {
        return Err(LadderError::not_found(format!("season {}", season_id)).into());
    }

    let winner_id = resolve_player(state, winner_name)?;
    let loser_id = resolve_player(state, loser_name)?;
    if winner_id == loser_id {
        return Err(LadderError::validation("winner and loser must be different players").into());
    }

    let match_id = generate_match_id();
    let seq = state.next_match_seq();
    state.matches.push(MatchRecord {
        id: match_id,
        season_id,
        winner_id,
        loser_id,
        played_at,
        score,
        note,
        seq,
    });

    let (winner_rank, loser_rank) = admit_pair(state, season_id, winner_id, loser_id);
    let shift = resolve_outcome(winner_rank, loser_rank);
    let moved = apply_shift(state, season_id, winner_id, shift);
    debug!(
        "Resolved match in season {} - winner {} (rank {}), loser {} (rank {}), shift {:?}, {} entries moved",
        season_id, winner_id, winner_rank, loser_id, loser_rank, shift, moved
    );

    Ok(match_id)
}

//! Rank normalization
//!
//! Collapses a season's distinct rank values to a contiguous 1..K sequence.
//! Ties stay ties and relative order is untouched; only the gaps between
//! rank values disappear. This is an explicit maintenance operation, never
//! triggered by match resolution or placement.

use crate::error::{LadderError, Result};
use crate::store::memory::LadderState;
use crate::types::{Rank, SeasonId};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Remap the season's distinct ranks to 1, 2, 3, ... preserving order.
///
/// Returns the number of entries whose rank changed; an already-dense
/// ladder reports 0 and a second application is a no-op.
pub fn densify_ranks(state: &mut LadderState, season_id: SeasonId) -> Result<usize> {
    if state.season(season_id).is_none() {
        return Err(LadderError::not_found(format!("season {}", season_id)).into());
    }

    let distinct: BTreeSet<Rank> = state.season_entries(season_id).map(|e| e.rank).collect();
    let remap: HashMap<Rank, Rank> = distinct
        .into_iter()
        .enumerate()
        .map(|(index, old)| (old, (index + 1) as Rank))
        .collect();

    let mut changed = 0usize;
    for entry in state.season_entries_mut(season_id) {
        let new_rank = remap[&entry.rank];
        if entry.rank != new_rank {
            entry.rank = new_rank;
            changed += 1;
        }
    }

    debug!(
        "Densified ranks in season {} - {} entries changed",
        season_id, changed
    );
    Ok(changed)
}

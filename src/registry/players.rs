//! Player registry: name-keyed identity with create-if-absent semantics
//!
//! Names are matched on the trimmed string, exactly. All functions here run
//! inside a store transaction, so the lookup and the insert of a new player
//! happen under one exclusive critical section and a concurrent race on the
//! same new name resolves to a single row.

use crate::error::{LadderError, Result};
use crate::store::memory::LadderState;
use crate::types::{Player, PlayerId};
use crate::utils::normalize_name;
use tracing::debug;

/// Resolve a display name to a player id, creating the player on first sight.
///
/// Idempotent: repeated calls with the same name return the same id and
/// leave the roster unchanged. Blank names fail validation.
pub fn resolve_player(state: &mut LadderState, raw_name: &str) -> Result<PlayerId> {
    let name = normalize_name(raw_name)?;

    if let Some(player) = state.player_by_name(&name) {
        return Ok(player.id);
    }

    let player_id = state.allocate_player(name.clone());
    debug!("Registered new player '{}' with id {}", name, player_id);
    Ok(player_id)
}

/// Toggle a player's active flag. The ranking rules never consult the flag;
/// it exists for roster administration.
pub fn set_player_active(state: &mut LadderState, player_id: PlayerId, active: bool) -> Result<()> {
    let player = state
        .player_mut(player_id)
        .ok_or_else(|| LadderError::not_found(format!("player {}", player_id)))?;
    player.active = active;
    Ok(())
}

/// Full roster, ordered by name ascending
pub fn list_players(state: &LadderState) -> Vec<Player> {
    let mut players = state.players.clone();
    players.sort_by(|a, b| a.name.cmp(&b.name));
    players
}

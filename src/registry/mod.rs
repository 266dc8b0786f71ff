//! Player identity management

pub mod players;

pub use players::{list_players, resolve_player, set_player_active};

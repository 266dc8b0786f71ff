//! Ranking store: ladder state, transactions, and snapshot persistence

pub mod memory;
pub mod snapshot;

// Re-export commonly used types
pub use memory::{LadderState, MemoryLadderStore};
pub use snapshot::{JsonFileSnapshot, NullSnapshot, SnapshotStore};

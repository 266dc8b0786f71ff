//! Ladder placement, match resolution, and rank normalization

pub mod normalize;
pub mod placement;
pub mod resolution;

// Re-export commonly used operations
pub use normalize::densify_ranks;
pub use placement::{admit_pair, ensure_in_ladder, init_season, place_player};
pub use resolution::{apply_shift, report_match, resolve_outcome, RankShift};

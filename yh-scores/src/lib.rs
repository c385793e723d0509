//! High-score table and end-of-game rating.

pub mod rating;
pub mod store;

pub use rating::{rate_result, Rating};
pub use store::{
    best_score, HighScore, HighScoreStore, JsonFileStore, MemoryStore, ScoreStoreError,
    DEFAULT_PLAYER_NAME, MAX_HIGH_SCORES,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

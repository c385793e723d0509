//! Single-player game session on top of `yh-core`: owns the game state, gates
//! rolls behind the animation lock, emits feedback cues and NDJSON events.

pub mod autoplay;
pub mod clock;
pub mod feedback;
pub mod roll_lock;
pub mod session;

pub use autoplay::{
    choose_action, histogram, play_game, simulate_games, summarize_scores, ParseStrategyError,
    ScoreSummary, SimulationResult, Strategy,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use feedback::{Cue, Feedback, FeedbackError, Haptic, NullFeedback};
pub use roll_lock::{RollLock, RollTicket};
pub use session::{ScoreReceipt, Session, SessionError, SessionStats, DEFAULT_ROLL_ANIMATION};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

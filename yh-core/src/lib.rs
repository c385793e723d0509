//! yh-core: Yahtzee rules, scoring, state representation, and configuration.

pub mod action;
pub mod category;
pub mod chance;
pub mod config;
pub mod engine;
pub mod legal;
pub mod scoring;
pub mod state;

pub use action::{action_to_index, index_to_action, Action, A};
pub use category::{Category, ParseCategoryError, NUM_CATS};
pub use chance::{roll5, DiceSource, EventKey};
pub use config::{ChanceKind, Config, ConfigError, Theme};
pub use engine::{apply_action, initial_state, is_terminal, validate_state, ApplyError};
pub use legal::{is_legal, legal_action_mask, legal_actions, LegalMask};
pub use scoring::{
    grand_total, is_scorecard_complete, is_yahtzee, lower_total, potential_score,
    scores_for_dice, upper_bonus, upper_total, Dice,
};
pub use state::{Die, GameState, Scorecard, MAX_ROLLS, NUM_DICE, TOTAL_ROUNDS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifies the rule set in logs and saved data.
pub const RULESET_ID: &str = "yahtzee_classic_v1";


#[cfg(test)]
mod category_tests;
#[cfg(test)]
mod engine_tests;

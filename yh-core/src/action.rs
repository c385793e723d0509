//! Action space and index mapping.
//!
//! Action space size: A = 19
//! - idx 0        : Roll
//! - idx 1..=5    : ToggleHold(die) where die = idx - 1
//! - idx 6..=18   : Score(cat) where cat index = idx - 6

use crate::category::{Category, NUM_CATS};
use crate::state::NUM_DICE;

pub const HOLD_BASE: usize = 1;
pub const SCORE_BASE: usize = HOLD_BASE + NUM_DICE;
pub const A: usize = SCORE_BASE + NUM_CATS; // 19

/// A player intent as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Roll,
    /// Flip the held flag of die `id` (0..=4).
    ToggleHold(u8),
    Score(Category),
}

/// Convert an `Action` to its index (0..=18).
///
/// # Panics
/// Panics if a `ToggleHold` die id is out of range.
pub fn action_to_index(a: Action) -> usize {
    match a {
        Action::Roll => 0,
        Action::ToggleHold(id) => {
            assert!((id as usize) < NUM_DICE, "die id out of range: {}", id);
            HOLD_BASE + id as usize
        }
        Action::Score(cat) => SCORE_BASE + cat.index(),
    }
}

/// Convert an index (0..=18) to an `Action`.
///
/// # Panics
/// Panics if `idx >= A`.
pub fn index_to_action(idx: usize) -> Action {
    assert!(idx < A, "action index out of range: {}", idx);
    if idx == 0 {
        Action::Roll
    } else if idx < SCORE_BASE {
        Action::ToggleHold((idx - HOLD_BASE) as u8)
    } else {
        Action::Score(Category::ALL[idx - SCORE_BASE])
    }
}

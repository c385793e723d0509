//! Legal action mask generation.
//!
//! One legality definition shared by the engine (which refuses anything outside
//! the mask) and the presentation layer (which disables the matching controls).

use crate::action::{action_to_index, index_to_action, Action, A};
use crate::category::Category;
use crate::state::{GameState, NUM_DICE};

/// Bitset of legal actions for the fixed action space A=19.
///
/// Bit `i` corresponds to action index `i`.
pub type LegalMask = u32;

/// Return whether action index `idx` is legal under this mask.
#[inline]
pub fn is_legal(mask: LegalMask, idx: usize) -> bool {
    debug_assert!(idx < A);
    ((mask >> idx) & 1) != 0
}

/// Legality rules:
/// - game over: nothing is legal
/// - Roll: rolls left and no roll animation in flight
/// - ToggleHold: at least one roll this round and no roll animation in flight
/// - Score(cat): at least one roll this round and `cat` still open
///   (an in-flight roll animation does not block scoring; scoring cancels it)
pub fn legal_action_mask(state: &GameState, is_rolling: bool) -> LegalMask {
    let mut legal: LegalMask = 0;
    if state.is_game_over {
        return legal;
    }

    if state.rolls_left > 0 && !is_rolling {
        legal |= 1 << action_to_index(Action::Roll);
    }

    if !state.has_rolled() {
        return legal;
    }

    if !is_rolling {
        for id in 0..NUM_DICE as u8 {
            legal |= 1 << action_to_index(Action::ToggleHold(id));
        }
    }

    for cat in Category::ALL {
        if !state.scorecard.is_scored(cat) {
            legal |= 1 << action_to_index(Action::Score(cat));
        }
    }

    legal
}

/// Expand a mask into its actions, in index order.
pub fn legal_actions(mask: LegalMask) -> Vec<Action> {
    (0..A)
        .filter(|&i| is_legal(mask, i))
        .map(index_to_action)
        .collect()
}

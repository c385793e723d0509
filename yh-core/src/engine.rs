//! Game rules engine: state transitions for a single-player game.
//!
//! This module is the single place that mutates `GameState` via rules. Every
//! transition is all-or-nothing: it either returns the complete next state or an
//! error, never a partial update.

use thiserror::Error;

use crate::action::{action_to_index, Action};
use crate::category::Category;
use crate::chance::DiceSource;
use crate::legal::{is_legal, legal_action_mask};
use crate::scoring::{
    is_scorecard_complete, is_yahtzee, potential_score, YAHTZEE_BONUS_POINTS, YAHTZEE_POINTS,
};
use crate::state::{GameState, MAX_ROLLS, NUM_DICE, TOTAL_ROUNDS};

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("illegal action {action:?} in current state")]
    IllegalAction { action: Action },
    #[error("invalid state: {msg}")]
    InvalidState { msg: &'static str },
}

/// Create a fresh game state (round 1, three rolls, empty scorecard).
pub fn initial_state() -> GameState {
    GameState::new()
}

/// Terminal once all 13 categories are scored.
pub fn is_terminal(s: &GameState) -> bool {
    s.is_game_over
}

/// Apply an action to a state, producing the next state (or an error if illegal).
///
/// Roll-animation gating is not the engine's concern; callers that track an
/// animation lock check it before calling in.
pub fn apply_action(
    mut state: GameState,
    action: Action,
    dice: &mut DiceSource,
) -> Result<GameState, ApplyError> {
    validate_state(&state)?;

    if let Action::ToggleHold(id) = action {
        if id as usize >= NUM_DICE {
            return Err(ApplyError::IllegalAction { action });
        }
    }
    let legal = legal_action_mask(&state, false);
    if !is_legal(legal, action_to_index(action)) {
        return Err(ApplyError::IllegalAction { action });
    }

    match action {
        Action::Roll => {
            let next = dice.roll_unheld(&state);
            for (die, v) in state.dice.iter_mut().zip(next) {
                die.value = v;
            }
            // Legal mask already enforced rolls_left > 0.
            state.rolls_left -= 1;
            Ok(state)
        }
        Action::ToggleHold(id) => {
            let die = &mut state.dice[id as usize];
            die.is_held = !die.is_held;
            Ok(state)
        }
        Action::Score(cat) => Ok(apply_score(state, cat)),
    }
}

/// Bank `cat` with the current dice. Preconditions are enforced by `apply_action`.
fn apply_score(mut state: GameState, cat: Category) -> GameState {
    let values = state.dice_values();
    let score = potential_score(&values, cat);

    // Joker bonus: a further Yahtzee after the yahtzee slot already holds 50,
    // whatever category is being scored now.
    if is_yahtzee(&values)
        && state.has_rolled()
        && state.scorecard.get(Category::Yahtzee) == Some(YAHTZEE_POINTS)
    {
        state.yahtzee_bonus += YAHTZEE_BONUS_POINTS;
    }

    state.scorecard.record(cat, score);

    let complete = is_scorecard_complete(&state.scorecard);
    if !complete {
        state.current_round += 1;
    }
    state.rolls_left = MAX_ROLLS;
    for die in &mut state.dice {
        die.is_held = false;
    }
    state.is_game_over = complete;
    state
}

/// Checks on a snapshot: field ranges, die ids, bonus granularity, and
/// consistency of round, game-over and bonus with the scorecard.
pub fn validate_state(s: &GameState) -> Result<(), ApplyError> {
    if s.rolls_left > MAX_ROLLS {
        return Err(ApplyError::InvalidState {
            msg: "rolls_left must be in 0..=3",
        });
    }
    if !(1..=TOTAL_ROUNDS).contains(&s.current_round) {
        return Err(ApplyError::InvalidState {
            msg: "current_round must be in 1..=13",
        });
    }
    for (i, d) in s.dice.iter().enumerate() {
        if d.id as usize != i {
            return Err(ApplyError::InvalidState {
                msg: "die id must match its slot",
            });
        }
        if !(1..=6).contains(&d.value) {
            return Err(ApplyError::InvalidState {
                msg: "dice values must be in 1..=6",
            });
        }
    }
    if s.yahtzee_bonus % YAHTZEE_BONUS_POINTS != 0 {
        return Err(ApplyError::InvalidState {
            msg: "yahtzee_bonus must be a multiple of 100",
        });
    }
    if s.yahtzee_bonus > 0 && s.scorecard.get(Category::Yahtzee) != Some(YAHTZEE_POINTS) {
        return Err(ApplyError::InvalidState {
            msg: "yahtzee_bonus requires the yahtzee slot to hold 50",
        });
    }

    // Fields that follow from the scorecard must agree with it.
    let expected_round = (s.scorecard.scored_count() + 1).min(TOTAL_ROUNDS as usize);
    if s.current_round as usize != expected_round {
        return Err(ApplyError::InvalidState {
            msg: "current_round must be one past the scored categories",
        });
    }
    if s.is_game_over != is_scorecard_complete(&s.scorecard) {
        return Err(ApplyError::InvalidState {
            msg: "is_game_over must match scorecard completion",
        });
    }
    Ok(())
}

//! Session data model: dice, scorecard and the `GameState` aggregate.

use serde::{Deserialize, Serialize};

use crate::category::{Category, NUM_CATS};
use crate::scoring::{grand_total, Dice};

pub const NUM_DICE: usize = 5;
pub const MAX_ROLLS: u8 = 3;
pub const TOTAL_ROUNDS: u8 = 13;

/// One die. `id` is stable for the whole session and equals its slot in `GameState::dice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Die {
    pub id: u8,
    pub value: u8,
    pub is_held: bool,
}

impl Die {
    pub const fn new(id: u8) -> Self {
        Self {
            id,
            value: 1,
            is_held: false,
        }
    }
}

/// Write-once score slots, one per category.
///
/// A slot that holds a value (including 0) never changes again; `record` on a
/// filled slot is refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scorecard {
    slots: [Option<u32>; NUM_CATS],
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, cat: Category) -> Option<u32> {
        self.slots[cat.index()]
    }

    #[inline]
    pub fn is_scored(&self, cat: Category) -> bool {
        self.slots[cat.index()].is_some()
    }

    /// Fill an empty slot. Returns false (and leaves the card untouched) if the
    /// slot was already filled.
    pub fn record(&mut self, cat: Category, score: u32) -> bool {
        let slot = &mut self.slots[cat.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(score);
        true
    }

    pub fn scored_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate `(category, slot)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<u32>)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Categories that can still be scored, in index order.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.is_scored(c))
    }
}

/// Aggregate root of one single-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub dice: [Die; NUM_DICE],
    pub rolls_left: u8,
    pub current_round: u8,
    pub scorecard: Scorecard,
    pub yahtzee_bonus: u32,
    pub is_game_over: bool,
}

impl GameState {
    /// Fresh game: round 1, three rolls, empty card, all dice showing 1 and unheld.
    pub fn new() -> Self {
        Self {
            dice: [Die::new(0), Die::new(1), Die::new(2), Die::new(3), Die::new(4)],
            rolls_left: MAX_ROLLS,
            current_round: 1,
            scorecard: Scorecard::new(),
            yahtzee_bonus: 0,
            is_game_over: false,
        }
    }

    pub fn dice_values(&self) -> Dice {
        self.dice.map(|d| d.value)
    }

    /// True once at least one roll has happened in the current round.
    pub fn has_rolled(&self) -> bool {
        self.rolls_left < MAX_ROLLS
    }

    /// Round number for display, clamped to 13.
    pub fn display_round(&self) -> u8 {
        self.current_round.min(TOTAL_ROUNDS)
    }

    pub fn total_score(&self) -> u32 {
        grand_total(&self.scorecard, self.yahtzee_bonus)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

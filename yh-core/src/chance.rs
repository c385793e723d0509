//! Dice generation.
//!
//! Two sources:
//! - `Rng`: a seeded ChaCha8 stream, the normal mode of play.
//! - `DeterministicEventKeyed`: dice are a pure function of
//!   (game_seed, round_idx, roll_idx), so a game replays identically no matter
//!   how many draws happened before. When k dice are rerolled they take the first
//!   k values of that event's sequence, in die-id order.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::scoring::Dice;
use crate::state::{GameState, MAX_ROLLS};

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub game_seed: u64,
    pub round_idx: u8,
    pub roll_idx: u8,
}

impl EventKey {
    /// Key of the roll about to happen in `state`.
    pub fn for_next_roll(game_seed: u64, state: &GameState) -> Self {
        Self {
            game_seed,
            round_idx: state.current_round.saturating_sub(1),
            roll_idx: MAX_ROLLS.saturating_sub(state.rolls_left),
        }
    }
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    let mut x = key.game_seed;
    x ^= (key.round_idx as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll_idx as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 dice for the given event key.
pub fn roll5(key: EventKey) -> Dice {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

/// Where rolled values come from.
pub enum DiceSource {
    DeterministicEventKeyed { game_seed: u64 },
    Rng { rng: Box<ChaCha8Rng> },
}

impl DiceSource {
    pub fn new_deterministic(game_seed: u64) -> Self {
        DiceSource::DeterministicEventKeyed { game_seed }
    }

    pub fn new_rng(seed: u64) -> Self {
        DiceSource::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        DiceSource::Rng {
            rng: Box::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Values after rolling every unheld die of `state`. Held dice keep their value.
    pub fn roll_unheld(&mut self, state: &GameState) -> Dice {
        let mut next = state.dice_values();
        match self {
            DiceSource::DeterministicEventKeyed { game_seed } => {
                let draws = roll5(EventKey::for_next_roll(*game_seed, state));
                let mut k = 0usize;
                for (v, die) in next.iter_mut().zip(state.dice.iter()) {
                    if !die.is_held {
                        *v = draws[k];
                        k += 1;
                    }
                }
            }
            DiceSource::Rng { rng } => {
                for (v, die) in next.iter_mut().zip(state.dice.iter()) {
                    if !die.is_held {
                        *v = rng.gen_range(1..=6);
                    }
                }
            }
        }
        next
    }
}
